//! Configuration validation rules.
//!
//! - At least one runtime version, each with an embedded stdlib table
//! - Timeouts must be non-zero
//! - Tool executables must be named

use crate::config::schema::ValidatorConfig;
use crate::error::{ReqgateError, Result};
use crate::requirements::StandardLibraryIndex;

/// Collect every problem with `config`.
pub fn validate_config(config: &ValidatorConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.runtime_versions.is_empty() {
        errors.push("At least one runtime version is required".to_string());
    }

    let available = StandardLibraryIndex::available_versions();
    for version in &config.runtime_versions {
        if !available.contains(version) {
            errors.push(format!(
                "Runtime version '{}' is not supported (available: {})",
                version,
                available.iter().cloned().collect::<Vec<_>>().join(", ")
            ));
        }
    }

    if config.manifest_timeout_secs == 0 {
        errors.push("manifest_timeout_secs must be greater than zero".to_string());
    }
    if config.tool_timeout_secs == 0 {
        errors.push("tool_timeout_secs must be greater than zero".to_string());
    }
    if config.python.trim().is_empty() {
        errors.push("python must name an executable".to_string());
    }
    if config.dependency_tree.trim().is_empty() {
        errors.push("dependency_tree must name an executable".to_string());
    }

    errors
}

/// Validate a configuration, failing with every problem found.
pub fn validate(config: &ValidatorConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ReqgateError::ConfigValidationError {
            message: errors.join("; "),
        })
    }
}

//! Configuration schema.
//!
//! Every key is optional; a missing config file means all defaults.
//!
//! ```yaml
//! runtime_versions: ["3.8", "3.11"]
//! components_dir: components
//! manifest_timeout_secs: 10
//! tool_timeout_secs: 600
//! python: python3
//! dependency_tree: pipdeptree
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Validator settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Runtime versions whose standard library must not be shadowed.
    pub runtime_versions: Vec<String>,

    /// Directory holding component metadata files.
    pub components_dir: PathBuf,

    /// Bound on each manifest HTTP request, in seconds.
    pub manifest_timeout_secs: u64,

    /// Bound on each installer / inspector subprocess, in seconds.
    pub tool_timeout_secs: u64,

    /// Python executable used as `<python> -m pip install`.
    pub python: String,

    /// Dependency-tree inspector executable.
    pub dependency_tree: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            runtime_versions: vec!["3.8".to_string()],
            components_dir: PathBuf::from("components"),
            manifest_timeout_secs: 10,
            tool_timeout_secs: 600,
            python: "python3".to_string(),
            dependency_tree: "pipdeptree".to_string(),
        }
    }
}

impl ValidatorConfig {
    pub fn manifest_timeout(&self) -> Duration {
        Duration::from_secs(self.manifest_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

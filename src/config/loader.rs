//! Configuration file discovery and loading.

use crate::config::schema::ValidatorConfig;
use crate::error::{ReqgateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".reqgate.yml";

/// Find `.reqgate.yml` in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ValidatorConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReqgateError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReqgateError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config. An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ValidatorConfig> {
    if content.trim().is_empty() {
        return Ok(ValidatorConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ReqgateError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the explicit config file, else `.reqgate.yml` in `dir`, else defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<ValidatorConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => match find_config(dir) {
            Some(path) => {
                tracing::debug!("Using config {}", path.display());
                load_config_file(&path)
            }
            None => Ok(ValidatorConfig::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_discovered_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(None, temp.path()).unwrap();
        assert_eq!(config, ValidatorConfig::default());
    }

    #[test]
    fn discovered_config_is_loaded() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "components_dir: integrations\n",
        )
        .unwrap();

        let config = load_config(None, temp.path()).unwrap();
        assert_eq!(config.components_dir, PathBuf::from("integrations"));
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config(Some(&temp.path().join("nope.yml")), temp.path()).unwrap_err();
        assert!(matches!(err, ReqgateError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "runtime_versions: [unclosed\n").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ReqgateError::ConfigParseError { .. }));
    }

    #[test]
    fn empty_file_is_defaults() {
        let config = parse_config("\n", Path::new("empty.yml")).unwrap();
        assert_eq!(config, ValidatorConfig::default());
    }
}

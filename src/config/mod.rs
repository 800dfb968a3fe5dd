//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! Settings come from `--config <file>` or `.reqgate.yml` in the working
//! directory; command-line flags and `REQGATE_*` environment variables
//! override individual keys.
//!
//! # Example
//!
//! ```
//! use reqgate::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".reqgate.yml"), "runtime_versions: ['3.8', '3.12']").unwrap();
//!
//! let config = load_config(None, temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.runtime_versions, vec!["3.8", "3.12"]);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::ValidatorConfig;
pub use validator::{validate, validate_config};

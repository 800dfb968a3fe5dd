//! Error types for reqgate operations.
//!
//! This module defines [`ReqgateError`], the error type for operational
//! failures (configuration, subprocess spawning, IO), and a [`Result`] type
//! alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ReqgateError` for failures that stop a command from running at all
//! - Per-requirement and per-manifest problems are *not* errors: they are
//!   [`Issue`](crate::requirements::Issue) values collected into a verdict
//! - Use `anyhow::Error` (via `ReqgateError::Other`) for unexpected errors

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for reqgate operations.
#[derive(Debug, Error)]
pub enum ReqgateError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No standard-library table is available for a runtime version.
    #[error("Unsupported runtime version: {version}")]
    UnsupportedRuntimeVersion { version: String },

    /// External command could not be waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// External command could not be started at all.
    #[error("Failed to start {command}: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// External command exceeded its wall-clock budget and was killed.
    #[error("Command timed out after {}s: {command}", timeout.as_secs())]
    CommandTimedOut { command: String, timeout: Duration },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for reqgate operations.
pub type Result<T> = std::result::Result<T, ReqgateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = ReqgateError::ConfigNotFound {
            path: PathBuf::from("/foo/.reqgate.yml"),
        };
        assert!(err.to_string().contains("/foo/.reqgate.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ReqgateError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn unsupported_runtime_version_displays_version() {
        let err = ReqgateError::UnsupportedRuntimeVersion {
            version: "2.7".into(),
        };
        assert!(err.to_string().contains("2.7"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = ReqgateError::CommandFailed {
            command: "pipdeptree -w silence".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("pipdeptree -w silence"));
        assert!(msg.contains('1'));
    }

    #[test]
    fn command_spawn_displays_reason() {
        let err = ReqgateError::CommandSpawn {
            command: "python3 -m pip install foo".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("python3 -m pip install foo"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn command_timed_out_displays_seconds() {
        let err = ReqgateError::CommandTimedOut {
            command: "python3 -m pip install foo".into(),
            timeout: Duration::from_secs(30),
        };
        let msg = err.to_string();
        assert!(msg.contains("30s"));
        assert!(msg.contains("pip install foo"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ReqgateError = io_err.into();
        assert!(matches!(err, ReqgateError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ReqgateError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}

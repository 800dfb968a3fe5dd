//! Problems found while validating a manifest.
//!
//! Each [`Issue`] is attached to the verdict of the manifest it was found in.
//! Only [`Issue::Resolve`] is non-fatal: a single requirement whose tree could
//! not be inspected does not fail the manifest on its own.

use serde::Serialize;
use thiserror::Error;

/// How an issue affects the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    /// Requirement string could not be parsed.
    #[error("Failed to parse requirement {requirement}: {reason}")]
    Parse { requirement: String, reason: String },

    /// Installer exited non-zero, timed out, or could not start.
    #[error("Requirement {requirement} failed to install{}", detail_suffix(.detail))]
    Install {
        requirement: String,
        detail: Option<String>,
    },

    /// Dependency-tree inspection failed for one requirement.
    #[error("Failed to resolve requirements for {requirement}: {reason}")]
    Resolve { requirement: String, reason: String },

    /// Non-empty requirement set resolved to nothing at all.
    #[error("Failed to resolve requirements {}", .requirements.join(", "))]
    UnresolvedSet { requirements: Vec<String> },

    /// Resolved package shadows a standard-library module.
    #[error("Package {package} is not compatible with {version} standard library")]
    StdlibConflict { package: String, version: String },

    /// Component file could not be read or is not valid JSON.
    #[error("Failed to read component file {path}: {reason}")]
    ComponentRead { path: String, reason: String },

    /// Manifest could not be fetched or parsed.
    #[error("Failed to fetch manifest from {url}: {reason}")]
    ManifestFetch { url: String, reason: String },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl Issue {
    /// Whether this issue affects the verdict.
    pub fn severity(&self) -> Severity {
        match self {
            Issue::Resolve { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Short machine-readable identifier used in JSON reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Issue::Parse { .. } => "parse",
            Issue::Install { .. } => "install",
            Issue::Resolve { .. } => "resolve",
            Issue::UnresolvedSet { .. } => "unresolved-set",
            Issue::StdlibConflict { .. } => "stdlib-conflict",
            Issue::ComponentRead { .. } => "component-read",
            Issue::ManifestFetch { .. } => "manifest-fetch",
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Error
    }
}

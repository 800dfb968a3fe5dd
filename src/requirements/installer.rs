//! Requirement installation.
//!
//! Every requirement is installed with its own installer invocation so a
//! failure can be attributed to the requirement that caused it. A failure
//! never stops the remaining installs: one pass reports every broken
//! requirement in the set.

use crate::requirements::issue::Issue;
use crate::requirements::parse::ParsedRequirement;
use crate::requirements::tooling::PackageTooling;

/// Outcome of installing a requirement set.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    /// Requirements that installed cleanly.
    pub installed: Vec<String>,
    /// One `Issue::Install` per requirement that did not.
    pub failures: Vec<Issue>,
}

impl InstallReport {
    /// True only when every requirement installed.
    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Install each requirement, passing its flags and reference through as-is.
pub fn install(requirements: &[ParsedRequirement], tooling: &dyn PackageTooling) -> InstallReport {
    let mut report = InstallReport::default();

    for req in requirements {
        let args = req.installer_args();
        match tooling.run_install(&args) {
            Ok(result) if result.success => {
                tracing::debug!("Installed {} in {:?}", req, result.duration);
                report.installed.push(req.raw().to_string());
            }
            Ok(result) => {
                tracing::debug!("Install of {} failed: {}", req, result.stderr.trim());
                report.failures.push(Issue::Install {
                    requirement: req.raw().to_string(),
                    detail: result.exit_code.map(|code| format!("exit code {code}")),
                });
            }
            Err(e) => {
                report.failures.push(Issue::Install {
                    requirement: req.raw().to_string(),
                    detail: Some(e.to_string()),
                });
            }
        }
    }

    report
}

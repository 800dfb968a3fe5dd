//! External package tooling.
//!
//! The installer and resolver never spawn processes directly; they go
//! through [`PackageTooling`] so tests can substitute canned output
//! (see [`MockTooling`](super::mock::MockTooling)).

use crate::error::Result;
use crate::shell::{execute, CommandOptions, CommandResult};
use std::time::Duration;

/// The two operations the validator needs from the package environment.
pub trait PackageTooling {
    /// Install one requirement. `args` are the requirement's flags followed
    /// by its package reference.
    fn run_install(&self, args: &[String]) -> Result<CommandResult>;

    /// Print the dependency tree of one installed package.
    fn run_dependency_tree(&self, package: &str) -> Result<CommandResult>;
}

/// Runs `pip` and `pipdeptree` as subprocesses.
#[derive(Debug, Clone)]
pub struct ProcessTooling {
    python: String,
    dependency_tree: String,
    timeout: Option<Duration>,
}

impl ProcessTooling {
    /// Create tooling that installs with `<python> -m pip` and inspects with
    /// the `dependency_tree` executable.
    pub fn new(python: impl Into<String>, dependency_tree: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            dependency_tree: dependency_tree.into(),
            timeout: None,
        }
    }

    /// Bound every subprocess by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full argument list passed to the python executable for an install.
    pub fn install_command(&self, args: &[String]) -> Vec<String> {
        let mut full = vec![
            "-m".to_string(),
            "pip".to_string(),
            "install".to_string(),
            "--quiet".to_string(),
        ];
        full.extend(args.iter().cloned());
        full
    }

    /// Full argument list passed to the dependency-tree executable.
    pub fn tree_command(&self, package: &str) -> Vec<String> {
        vec![
            "-w".to_string(),
            "silence".to_string(),
            "--packages".to_string(),
            package.to_string(),
        ]
    }
}

impl PackageTooling for ProcessTooling {
    fn run_install(&self, args: &[String]) -> Result<CommandResult> {
        let options = CommandOptions::captured(self.timeout);
        execute(&self.python, &self.install_command(args), &options)
    }

    fn run_dependency_tree(&self, package: &str) -> Result<CommandResult> {
        let options = CommandOptions::captured(self.timeout);
        execute(&self.dependency_tree, &self.tree_command(package), &options)
    }
}

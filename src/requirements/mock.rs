//! Mock package tooling for testing.
//!
//! `MockTooling` implements [`PackageTooling`] with canned results and
//! records every call for later assertion.
//!
//! # Example
//!
//! ```
//! use reqgate::requirements::{MockTooling, PackageTooling};
//!
//! let tooling = MockTooling::new()
//!     .with_tree("requests", "requests==2.28.0\n  - idna [required: >=2.5, installed: 3.4]\n")
//!     .with_install_failure("broken==0.1");
//!
//! assert!(tooling.run_install(&["requests==2.28.0".to_string()]).unwrap().success);
//! assert!(!tooling.run_install(&["broken==0.1".to_string()]).unwrap().success);
//! assert_eq!(tooling.installs().len(), 2);
//! ```

use crate::error::{ReqgateError, Result};
use crate::shell::CommandResult;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::tooling::PackageTooling;

/// Canned tooling that never spawns a process.
///
/// Installs succeed unless the last argument (the package reference) was
/// registered with [`with_install_failure`](Self::with_install_failure).
/// Dependency trees return the registered text, exit 1 for packages
/// registered with [`with_tree_failure`](Self::with_tree_failure), and
/// empty output for anything else.
#[derive(Debug, Default)]
pub struct MockTooling {
    trees: HashMap<String, String>,
    failing_installs: HashSet<String>,
    failing_trees: HashSet<String>,
    spawn_errors: HashSet<String>,
    installs: RefCell<Vec<Vec<String>>>,
    tree_queries: RefCell<Vec<String>>,
}

impl MockTooling {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the inspector output for `package`.
    pub fn with_tree(mut self, package: &str, output: &str) -> Self {
        self.trees.insert(package.to_string(), output.to_string());
        self
    }

    /// Make installing `reference` exit with code 1.
    pub fn with_install_failure(mut self, reference: &str) -> Self {
        self.failing_installs.insert(reference.to_string());
        self
    }

    /// Make inspecting `package` exit with code 1.
    pub fn with_tree_failure(mut self, package: &str) -> Self {
        self.failing_trees.insert(package.to_string());
        self
    }

    /// Make any call involving `target` fail to spawn.
    pub fn with_spawn_error(mut self, target: &str) -> Self {
        self.spawn_errors.insert(target.to_string());
        self
    }

    /// Argument lists passed to `run_install`, in call order.
    pub fn installs(&self) -> Vec<Vec<String>> {
        self.installs.borrow().clone()
    }

    /// Packages passed to `run_dependency_tree`, in call order.
    pub fn tree_queries(&self) -> Vec<String> {
        self.tree_queries.borrow().clone()
    }
}

fn spawn_error(command: String) -> ReqgateError {
    ReqgateError::CommandSpawn {
        command,
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
    }
}

impl PackageTooling for MockTooling {
    fn run_install(&self, args: &[String]) -> Result<CommandResult> {
        self.installs.borrow_mut().push(args.to_vec());
        let reference = args.last().cloned().unwrap_or_default();

        if self.spawn_errors.contains(&reference) {
            return Err(spawn_error(format!("pip install {}", args.join(" "))));
        }
        if self.failing_installs.contains(&reference) {
            return Ok(CommandResult::failure(
                Some(1),
                String::new(),
                format!("ERROR: No matching distribution found for {reference}"),
                Duration::ZERO,
            ));
        }
        Ok(CommandResult::success(
            String::new(),
            String::new(),
            Duration::ZERO,
        ))
    }

    fn run_dependency_tree(&self, package: &str) -> Result<CommandResult> {
        self.tree_queries.borrow_mut().push(package.to_string());

        if self.spawn_errors.contains(package) {
            return Err(spawn_error(format!("pipdeptree --packages {package}")));
        }
        if self.failing_trees.contains(package) {
            return Ok(CommandResult::failure(
                Some(1),
                String::new(),
                String::new(),
                Duration::ZERO,
            ));
        }
        let output = self.trees.get(package).cloned().unwrap_or_default();
        Ok(CommandResult::success(output, String::new(), Duration::ZERO))
    }
}

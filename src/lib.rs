//! reqgate - CI gate for component requirements.
//!
//! Given the files changed in a pull request, reqgate fetches the manifest
//! of every changed component, installs each declared requirement, resolves
//! the full transitive dependency set, and rejects any package that shadows
//! a module of the runtime's standard library.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`component`] - Component files, manifests, and structure checks
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`report`] - Human and JSON report formatters
//! - [`requirements`] - Parsing, installation, resolution, and stdlib checks
//! - [`runner`] - Validation of every changed component in one run
//! - [`shell`] - Subprocess execution with timeouts
//!
//! # Example
//!
//! ```
//! use reqgate::requirements::{
//!     validate_requirements, MockTooling, RequirementSet, StandardLibraryIndex,
//! };
//!
//! let tooling = MockTooling::new().with_tree("asyncio", "asyncio==3.4.3\n");
//! let index = StandardLibraryIndex::load(&["3.8"]).unwrap();
//! let requirements: RequirementSet = ["asyncio==3.4.3"].into_iter().collect();
//!
//! let verdict = validate_requirements("legacy", &requirements, &tooling, &index);
//! assert!(!verdict.passed());
//! ```

pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod report;
pub mod requirements;
pub mod runner;
pub mod shell;

pub use error::{ReqgateError, Result};

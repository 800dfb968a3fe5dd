//! Requirement installation, resolution and standard-library checking.
//!
//! This is the validation engine: it takes the raw requirement strings of one
//! component and decides whether they are installable, resolvable, and free
//! of standard-library name collisions.
//!
//! # Modules
//!
//! - [`parse`] - Requirement string parsing and name normalization
//! - [`installer`] - Per-requirement installation
//! - [`resolver`] - Transitive dependency-tree resolution
//! - [`stdlib`] - Embedded standard-library tables per runtime version
//! - [`checker`] - Standard-library conflict checking
//! - [`validate`] - The per-manifest pipeline and its verdict
//! - [`tooling`] - External tool abstraction
//! - [`mock`] - Canned tooling for tests
//! - [`issue`] - Validation problems

pub mod checker;
pub mod installer;
pub mod issue;
pub mod mock;
pub mod parse;
pub mod resolver;
pub mod stdlib;
pub mod tooling;
pub mod validate;

pub use checker::{check, CheckOutcome};
pub use installer::{install, InstallReport};
pub use issue::{Issue, Severity};
pub use mock::MockTooling;
pub use parse::{normalize_name, parse_requirement, ParseError, ParsedRequirement};
pub use resolver::{parse_tree, resolve, Resolution};
pub use stdlib::StandardLibraryIndex;
pub use tooling::{PackageTooling, ProcessTooling};
pub use validate::{validate_requirements, RequirementSet, Verdict};

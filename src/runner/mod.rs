//! Run orchestration across changed components.

pub mod manifests;

pub use manifests::{ManifestRunner, ManifestSource, RunProgress, RunReport};

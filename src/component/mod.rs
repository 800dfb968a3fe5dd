//! Component files and the manifests they point at.
//!
//! A component file lives under the components directory and names a remote
//! manifest:
//!
//! ```json
//! { "domain": "weather", "manifest": "https://raw.githubusercontent.com/.../manifest.json" }
//! ```
//!
//! The manifest itself declares the component's requirements:
//!
//! ```json
//! { "domain": "weather", "requirements": ["requests==2.28.0"] }
//! ```
//!
//! # Modules
//!
//! - [`fetch`] - Manifest download with a bounded timeout
//! - [`structure`] - Structural checks for component metadata files

pub mod fetch;
pub mod structure;

pub use fetch::ManifestFetcher;
pub use structure::{collect_structure_targets, validate_structure, StructureReport};

use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A component metadata file.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentFile {
    /// Component domain; the file stem is used when absent.
    #[serde(default)]
    pub domain: Option<String>,
    /// URL of the component's manifest.
    pub manifest: String,
}

impl ComponentFile {
    /// Read and parse a component file.
    pub fn load(path: &Path) -> std::result::Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&content).map_err(|e| e.to_string())
    }
}

/// A fetched component manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub domain: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// Domain to report for a component file before its manifest is known.
pub fn fallback_domain(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Select the changed component files from newline-separated `input`.
///
/// Relative lines are taken relative to `root`. Keeps paths that name an
/// existing `.json` file somewhere under `components_dir`. The result is
/// deduplicated and sorted.
pub fn collect_changed(
    input: &str,
    root: &Path,
    components_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut known = Vec::new();
    find_json_files(components_dir, &mut known)?;

    let known: BTreeSet<PathBuf> = known
        .into_iter()
        .filter_map(|p| p.canonicalize().ok())
        .collect();

    let changed: BTreeSet<PathBuf> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| root.join(line).canonicalize().ok())
        .filter(|path| known.contains(path))
        .collect();

    Ok(changed.into_iter().collect())
}

fn find_json_files(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            find_json_files(&path, found)?;
        } else if path.extension().is_some_and(|e| e == "json") {
            found.push(path);
        }
    }

    Ok(())
}

//! Structural validation of component metadata files.
//!
//! This is a schema check only; nothing is fetched or installed.
//!
//! | Key        | Rule                                                      |
//! |------------|-----------------------------------------------------------|
//! | `name`     | required string                                           |
//! | `owner`    | required non-empty list of `@handle` strings              |
//! | `manifest` | required string; GitHub links must be raw content URLs    |
//! | `url`      | required string                                           |

use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const RAW_GITHUB_HOST: &str = "raw.githubusercontent.com";

/// Problems found in one component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureReport {
    pub path: PathBuf,
    pub problems: Vec<String>,
}

impl StructureReport {
    pub fn ok(&self) -> bool {
        self.problems.is_empty()
    }

    /// File name shown in output.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Map changed paths onto files in `components_dir`.
///
/// Any changed path mentioning `components` is looked up by file name in
/// `components_dir`; only existing `.json` files are kept.
pub fn collect_structure_targets(input: &str, components_dir: &Path) -> Vec<PathBuf> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| line.contains("components"))
        .filter_map(|line| Path::new(line).file_name().map(|n| components_dir.join(n)))
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "json"))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Validate the structure of one component file.
pub fn validate_structure(path: &Path) -> StructureReport {
    let problems = match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Value>(&content) {
            Ok(value) => check_value(&value),
            Err(e) => vec![format!("Invalid JSON: {e}")],
        },
        Err(e) => vec![format!("Unable to read file: {e}")],
    };

    StructureReport {
        path: path.to_path_buf(),
        problems,
    }
}

fn check_value(value: &Value) -> Vec<String> {
    let Some(object) = value.as_object() else {
        return vec!["The component file is not a JSON object".to_string()];
    };

    let mut problems = Vec::new();

    for key in ["name", "url"] {
        match object.get(key) {
            None => problems.push(format!("The {key} key is required")),
            Some(v) if !v.is_string() => problems.push(format!("The {key} key is not a string")),
            Some(_) => {}
        }
    }

    match object.get("owner") {
        None => problems.push("The owner key is required".to_string()),
        Some(owner) => problems.extend(check_owner(owner)),
    }

    match object.get("manifest") {
        None => problems.push("The manifest key is required".to_string()),
        Some(manifest) => problems.extend(check_manifest(manifest)),
    }

    problems
}

fn check_owner(value: &Value) -> Option<String> {
    let Some(entries) = value.as_array() else {
        return Some("The owner key is not a list".to_string());
    };
    if entries.is_empty() {
        return Some("The owner list is empty".to_string());
    }
    entries.iter().find_map(|entry| match entry.as_str() {
        Some(handle) if handle.starts_with('@') => None,
        Some(handle) => Some(format!("The entry {handle} does not start with @")),
        None => Some(format!("The entry {entry} is not a string")),
    })
}

fn check_manifest(value: &Value) -> Option<String> {
    let Some(url) = value.as_str() else {
        return Some("The manifest key is not a string".to_string());
    };
    if url.contains("github") && !url.contains(RAW_GITHUB_HOST) {
        return Some("The URL for the manifest key is not a raw URL".to_string());
    }
    None
}

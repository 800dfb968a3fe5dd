//! Standard-library module tables per runtime version.
//!
//! Tables are embedded at compile time from `stdlib/<version>.txt`, one
//! module name per line (`#` starts a comment). Names are normalized the same
//! way requirement names are, so lookups are plain set membership.

use crate::error::{ReqgateError, Result};
use crate::requirements::parse::normalize_name;
use include_dir::{include_dir, Dir};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Embedded standard-library tables.
static STDLIB_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/stdlib");

/// Immutable map from runtime version to its standard-library names.
///
/// Built once per process and shared read-only with the conflict checker.
#[derive(Debug, Clone, Default)]
pub struct StandardLibraryIndex {
    tables: BTreeMap<String, HashSet<String>>,
}

impl StandardLibraryIndex {
    /// Load the embedded tables for each of `versions`.
    pub fn load<S: AsRef<str>>(versions: &[S]) -> Result<Self> {
        let mut tables = BTreeMap::new();
        for version in versions {
            let version = version.as_ref();
            let content = STDLIB_DIR
                .get_file(format!("{version}.txt"))
                .and_then(|file| file.contents_utf8())
                .ok_or_else(|| ReqgateError::UnsupportedRuntimeVersion {
                    version: version.to_string(),
                })?;
            tables.insert(version.to_string(), parse_table(content));
        }
        Ok(Self { tables })
    }

    /// Build an index from in-memory tables.
    pub fn from_tables<I, V, N>(tables: I) -> Self
    where
        I: IntoIterator<Item = (V, Vec<N>)>,
        V: Into<String>,
        N: AsRef<str>,
    {
        let tables = tables
            .into_iter()
            .map(|(version, names)| {
                let names = names.iter().map(|n| normalize_name(n.as_ref())).collect();
                (version.into(), names)
            })
            .collect();
        Self { tables }
    }

    /// Runtime versions with an embedded table.
    pub fn available_versions() -> BTreeSet<String> {
        STDLIB_DIR
            .files()
            .filter_map(|file| {
                let path = file.path();
                if path.extension()? != "txt" {
                    return None;
                }
                path.file_stem()?.to_str().map(str::to_string)
            })
            .collect()
    }

    /// Versions covered by this index, in order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Whether `name` is a standard-library module of `version`.
    pub fn contains(&self, version: &str, name: &str) -> bool {
        self.tables
            .get(version)
            .is_some_and(|names| names.contains(name))
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn parse_table(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(normalize_name)
        .collect()
}

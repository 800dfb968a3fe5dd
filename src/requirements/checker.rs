//! Standard-library conflict checking.
//!
//! A third-party distribution whose name matches a standard-library module
//! shadows that module once installed. [`check`] reports every such
//! collision for every supported runtime version.

use crate::requirements::issue::Issue;
use crate::requirements::stdlib::StandardLibraryIndex;
use std::collections::BTreeSet;

/// Result of checking resolved names against the standard library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// One `Issue::StdlibConflict` per (version, name) collision.
    pub conflicts: Vec<Issue>,
}

impl CheckOutcome {
    pub fn ok(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Compare resolved package names with each version's standard library.
///
/// Pure: the result depends only on the arguments. Conflicts are ordered by
/// version, then by name.
pub fn check(resolved: &BTreeSet<String>, index: &StandardLibraryIndex) -> CheckOutcome {
    let conflicts = index
        .versions()
        .flat_map(move |version| {
            resolved
                .iter()
                .filter(move |name| index.contains(version, name))
                .map(move |name| Issue::StdlibConflict {
                    package: name.clone(),
                    version: version.to_string(),
                })
        })
        .collect();

    CheckOutcome { conflicts }
}

//! Per-manifest requirement validation.
//!
//! ```text
//! START -> PARSE -> INSTALL -> RESOLVE -> CHECK -> PASSED
//!            |         |          |          |
//!            +---------+----------+----------+--> FAILED
//! ```
//!
//! Each stage runs only if the previous one succeeded: nothing is resolved
//! in a half-installed environment, and an empty resolution is never checked
//! against the standard library.

use crate::requirements::checker::check;
use crate::requirements::installer::install;
use crate::requirements::issue::Issue;
use crate::requirements::parse::{parse_requirement, ParsedRequirement};
use crate::requirements::resolver::resolve;
use crate::requirements::stdlib::StandardLibraryIndex;
use crate::requirements::tooling::PackageTooling;
use std::collections::BTreeSet;

/// The declared direct requirements of one component.
///
/// Entries are trimmed; blank entries are dropped and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet(BTreeSet<String>);

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, requirement: &str) -> bool {
        let requirement = requirement.trim();
        if requirement.is_empty() {
            return false;
        }
        self.0.insert(requirement.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for requirement in iter {
            set.insert(requirement.as_ref());
        }
        set
    }
}

/// Pass/fail outcome for one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Component domain the verdict belongs to.
    pub domain: String,
    /// Every issue found, fatal or not, in the order found.
    pub issues: Vec<Issue>,
    /// Resolved package names (empty if resolution never ran).
    pub resolved: BTreeSet<String>,
}

impl Verdict {
    /// A verdict with no issues yet.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            issues: Vec::new(),
            resolved: BTreeSet::new(),
        }
    }

    /// A verdict that failed before validation could start.
    pub fn failed(domain: impl Into<String>, issue: Issue) -> Self {
        let mut verdict = Self::new(domain);
        verdict.issues.push(issue);
        verdict
    }

    /// True when no fatal issue was found.
    pub fn passed(&self) -> bool {
        !self.issues.iter().any(Issue::is_fatal)
    }

    /// Fatal issues only.
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_fatal())
    }

    /// Non-fatal issues only.
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.is_fatal())
    }
}

/// Validate one component's requirement set.
pub fn validate_requirements(
    domain: &str,
    requirements: &RequirementSet,
    tooling: &dyn PackageTooling,
    index: &StandardLibraryIndex,
) -> Verdict {
    let mut verdict = Verdict::new(domain);

    let parsed = match parse_all(requirements) {
        Ok(parsed) => parsed,
        Err(issues) => {
            verdict.issues = issues;
            return verdict;
        }
    };

    let installed = install(&parsed, tooling);
    if !installed.ok() {
        verdict.issues.extend(installed.failures);
        return verdict;
    }

    let resolution = resolve(&parsed, tooling);
    verdict.issues.extend(resolution.failures);
    if !requirements.is_empty() && resolution.names.is_empty() {
        verdict.issues.push(Issue::UnresolvedSet {
            requirements: requirements.iter().map(str::to_string).collect(),
        });
        return verdict;
    }
    verdict.resolved = resolution.names;

    verdict.issues.extend(check(&verdict.resolved, index).conflicts);
    verdict
}

fn parse_all(requirements: &RequirementSet) -> Result<Vec<ParsedRequirement>, Vec<Issue>> {
    let mut parsed = Vec::with_capacity(requirements.len());
    let mut issues = Vec::new();

    for raw in requirements.iter() {
        match parse_requirement(raw) {
            Ok(req) => parsed.push(req),
            Err(e) => issues.push(Issue::Parse {
                requirement: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    if issues.is_empty() {
        Ok(parsed)
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::mock::MockTooling;

    fn index() -> StandardLibraryIndex {
        StandardLibraryIndex::load(&["3.8"]).unwrap()
    }

    #[test]
    fn requirement_set_drops_blanks_and_duplicates() {
        let set: RequirementSet = ["a==1", " a==1 ", "", "   ", "b"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a==1", "b"]);
    }

    #[test]
    fn parse_failure_stops_before_install() {
        let tooling = MockTooling::new();
        let set: RequirementSet = ["==1.0", "requests"].into_iter().collect();

        let verdict = validate_requirements("demo", &set, &tooling, &index());

        assert!(!verdict.passed());
        assert!(tooling.installs().is_empty());
        assert!(matches!(verdict.issues[0], Issue::Parse { .. }));
    }

    #[test]
    fn install_failure_skips_resolution() {
        let tooling = MockTooling::new().with_install_failure("bad==9.9");
        let set: RequirementSet = ["bad==9.9", "good==1.0"].into_iter().collect();

        let verdict = validate_requirements("demo", &set, &tooling, &index());

        assert!(!verdict.passed());
        assert_eq!(tooling.installs().len(), 2);
        assert!(tooling.tree_queries().is_empty());
    }

    #[test]
    fn nothing_resolved_is_unresolved_set() {
        let tooling = MockTooling::new().with_tree_failure("ghost");
        let set: RequirementSet = ["ghost"].into_iter().collect();

        let verdict = validate_requirements("demo", &set, &tooling, &index());

        assert!(!verdict.passed());
        assert!(verdict
            .issues
            .iter()
            .any(|i| matches!(i, Issue::UnresolvedSet { .. })));
    }

    #[test]
    fn partial_resolution_failure_is_warning_only() {
        let tooling = MockTooling::new()
            .with_tree("six", "six==1.16.0\n")
            .with_tree_failure("flaky");
        let set: RequirementSet = ["six", "flaky"].into_iter().collect();

        let verdict = validate_requirements("demo", &set, &tooling, &index());

        assert!(verdict.passed());
        assert_eq!(verdict.warnings().count(), 1);
        assert_eq!(verdict.errors().count(), 0);
    }

    #[test]
    fn empty_set_passes_without_tool_calls() {
        let tooling = MockTooling::new();
        let verdict = validate_requirements("demo", &RequirementSet::new(), &tooling, &index());

        assert!(verdict.passed());
        assert!(verdict.issues.is_empty());
        assert!(tooling.installs().is_empty());
        assert!(tooling.tree_queries().is_empty());
    }

    #[test]
    fn stdlib_collision_fails() {
        let tooling = MockTooling::new().with_tree("enum34", "enum34==1.1.10\n");
        let set: RequirementSet = ["enum34"].into_iter().collect();
        let index = StandardLibraryIndex::from_tables([("3.8", vec!["enum34"])]);

        let verdict = validate_requirements("demo", &set, &tooling, &index);

        assert!(!verdict.passed());
        assert_eq!(
            verdict.issues,
            vec![Issue::StdlibConflict {
                package: "enum34".into(),
                version: "3.8".into(),
            }]
        );
    }
}

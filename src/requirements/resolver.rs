//! Transitive requirement resolution.
//!
//! Each requirement's installed dependency tree is printed by the inspector
//! and flattened into package names. Trees look like:
//!
//! ```text
//! requests==2.28.0
//!   - certifi [required: >=2017.4.17, installed: 2022.9.24]
//!   - charset-normalizer [required: >=2,<3, installed: 2.1.1]
//!   - idna [required: >=2.5,<4, installed: 3.4]
//!   - urllib3 [required: >=1.21.1,<1.27, installed: 1.26.12]
//! ```

use crate::requirements::issue::Issue;
use crate::requirements::parse::{normalize_name, ParsedRequirement};
use crate::requirements::tooling::PackageTooling;
use std::collections::BTreeSet;

/// Names resolved from a requirement set, plus per-requirement failures.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Union of every root and dependency name found.
    pub names: BTreeSet<String>,
    /// One `Issue::Resolve` per requirement whose tree could not be read.
    pub failures: Vec<Issue>,
}

/// Resolve every requirement's dependency tree and union the names.
///
/// A requirement whose tree cannot be read contributes nothing; the others
/// are still resolved.
pub fn resolve(requirements: &[ParsedRequirement], tooling: &dyn PackageTooling) -> Resolution {
    let mut resolution = Resolution::default();

    for req in requirements {
        match resolve_one(req, tooling) {
            Ok(names) => {
                tracing::debug!("{} resolved to {} package(s)", req.name(), names.len());
                resolution.names.extend(names);
            }
            Err(reason) => {
                tracing::warn!("Failed to resolve requirements for {}: {}", req, reason);
                resolution.failures.push(Issue::Resolve {
                    requirement: req.raw().to_string(),
                    reason,
                });
            }
        }
    }

    resolution
}

fn resolve_one(
    req: &ParsedRequirement,
    tooling: &dyn PackageTooling,
) -> Result<BTreeSet<String>, String> {
    let result = tooling
        .run_dependency_tree(req.name())
        .map_err(|e| e.to_string())?;

    if !result.success {
        return Err(match result.exit_code {
            Some(code) => format!("dependency tree exited with code {code}"),
            None => "dependency tree was terminated".to_string(),
        });
    }

    parse_tree(&result.stdout)
}

/// Flatten inspector output into normalized package names.
///
/// The first line is the root package (`name==version`); every later line is
/// a dependency prefixed by tree drawing and suffixed by a bracketed
/// requirement/installed note.
pub fn parse_tree(output: &str) -> Result<BTreeSet<String>, String> {
    let mut lines = output.lines();
    let root = lines
        .next()
        .and_then(|line| line.split("==").next())
        .map(str::trim)
        .unwrap_or_default();

    if root.is_empty() {
        return Err("no package reported by dependency tree".to_string());
    }

    let mut names = BTreeSet::new();
    names.insert(normalize_name(root));

    for line in lines {
        let stripped = line.trim().trim_start_matches(['-', ' ']);
        let name = stripped.split('[').next().unwrap_or_default().trim();
        if !name.is_empty() {
            names.insert(normalize_name(name));
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::mock::MockTooling;
    use crate::requirements::parse::parse_requirement;

    const REQUESTS_TREE: &str = "requests==2.28.0
  - certifi [required: >=2017.4.17, installed: 2022.9.24]
  - charset-normalizer [required: >=2,<3, installed: 2.1.1]
  - idna [required: >=2.5,<4, installed: 3.4]
  - urllib3 [required: >=1.21.1,<1.27, installed: 1.26.12]
";

    fn parsed(inputs: &[&str]) -> Vec<ParsedRequirement> {
        inputs.iter().map(|s| parse_requirement(s).unwrap()).collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_tree_extracts_root_and_children() {
        let names = parse_tree(REQUESTS_TREE).unwrap();
        assert_eq!(
            names,
            set(&["certifi", "charset-normalizer", "idna", "requests", "urllib3"])
        );
    }

    #[test]
    fn parse_tree_handles_nested_levels() {
        let output = "flask==2.2.2
  - click [required: >=8.0, installed: 8.1.3]
  - Jinja2 [required: >=3.0, installed: 3.1.2]
    - MarkupSafe [required: >=2.0, installed: 2.1.1]
  - Werkzeug [required: >=2.2.2, installed: 2.2.2]
    - MarkupSafe [required: >=2.1.1, installed: 2.1.1]
";
        let names = parse_tree(output).unwrap();
        assert_eq!(
            names,
            set(&["click", "flask", "jinja2", "markupsafe", "werkzeug"])
        );
    }

    #[test]
    fn parse_tree_root_without_version() {
        let names = parse_tree("typing_extensions\n").unwrap();
        assert_eq!(names, set(&["typing-extensions"]));
    }

    #[test]
    fn parse_tree_rejects_empty_output() {
        assert!(parse_tree("").is_err());
        assert!(parse_tree("\n  - idna [required: any]\n").is_err());
    }

    #[test]
    fn dependency_is_included_regardless_of_order() {
        let tooling = MockTooling::new()
            .with_tree("a", "a==1.0\n  - b [required: any, installed: 2.0]\n")
            .with_tree("c", "c==0.1\n");

        let forward = resolve(&parsed(&["a==1.0", "c"]), &tooling);
        let backward = resolve(&parsed(&["c", "a==1.0"]), &tooling);

        assert_eq!(forward.names, set(&["a", "b", "c"]));
        assert_eq!(forward.names, backward.names);
    }

    #[test]
    fn inspector_is_queried_with_normalized_name() {
        let tooling = MockTooling::new();
        resolve(&parsed(&["--index-url https://x Foo_Bar>=1"]), &tooling);
        assert_eq!(tooling.tree_queries(), vec!["foo-bar"]);
    }

    #[test]
    fn failing_requirement_contributes_nothing_but_others_resolve() {
        let tooling = MockTooling::new()
            .with_tree("requests", REQUESTS_TREE)
            .with_tree_failure("broken");

        let resolution = resolve(&parsed(&["broken", "requests==2.28.0"]), &tooling);

        assert!(resolution.names.contains("requests"));
        assert!(!resolution.names.contains("broken"));
        assert_eq!(resolution.failures.len(), 1);
        assert!(matches!(
            &resolution.failures[0],
            Issue::Resolve { requirement, .. } if requirement == "broken"
        ));
    }

    #[test]
    fn spawn_error_is_a_resolve_failure() {
        let tooling = MockTooling::new().with_spawn_error("a");
        let resolution = resolve(&parsed(&["a"]), &tooling);
        assert!(resolution.names.is_empty());
        assert_eq!(resolution.failures.len(), 1);
    }

    #[test]
    fn empty_set_resolves_to_empty() {
        let tooling = MockTooling::new();
        let resolution = resolve(&[], &tooling);
        assert!(resolution.names.is_empty());
        assert!(resolution.failures.is_empty());
    }
}

//! Validation of every changed component in one run.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::component::{fallback_domain, ComponentFile, Manifest, ManifestFetcher};
use crate::requirements::{
    validate_requirements, Issue, PackageTooling, RequirementSet, StandardLibraryIndex, Verdict,
};

/// Where manifests come from.
pub trait ManifestSource {
    /// Fetch and parse the manifest at `url`.
    fn fetch_manifest(&self, url: &str) -> anyhow::Result<Manifest>;
}

impl ManifestSource for ManifestFetcher {
    fn fetch_manifest(&self, url: &str) -> anyhow::Result<Manifest> {
        self.fetch(url)
    }
}

/// Progress events emitted while validating manifests.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A component is about to be validated.
    ManifestStarting {
        domain: &'a str,
        index: usize,
        total: usize,
    },
    /// A component finished.
    ManifestFinished { verdict: &'a Verdict },
}

/// Verdicts for every component in a run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// One verdict per component file, in path order.
    pub verdicts: Vec<Verdict>,
    /// Total duration.
    pub duration: Duration,
}

impl RunReport {
    /// True when every verdict passed; vacuously true for an empty run.
    pub fn passed(&self) -> bool {
        self.verdicts.iter().all(Verdict::passed)
    }

    pub fn failed_count(&self) -> usize {
        self.verdicts.iter().filter(|v| !v.passed()).count()
    }
}

/// Validates component files one after another.
///
/// A failing component never stops the run: every component gets a verdict
/// so a single pass surfaces every problem.
pub struct ManifestRunner<'a> {
    source: &'a dyn ManifestSource,
    tooling: &'a dyn PackageTooling,
    index: &'a StandardLibraryIndex,
}

impl<'a> ManifestRunner<'a> {
    pub fn new(
        source: &'a dyn ManifestSource,
        tooling: &'a dyn PackageTooling,
        index: &'a StandardLibraryIndex,
    ) -> Self {
        Self {
            source,
            tooling,
            index,
        }
    }

    /// Validate every component file.
    pub fn run(&self, components: &[PathBuf]) -> RunReport {
        self.run_with_progress(components, |_| {})
    }

    /// Validate every component file with a progress callback.
    pub fn run_with_progress(
        &self,
        components: &[PathBuf],
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> RunReport {
        let start = Instant::now();
        let mut sorted = components.to_vec();
        sorted.sort();

        let total = sorted.len();
        let mut verdicts = Vec::with_capacity(total);

        for (index, path) in sorted.iter().enumerate() {
            let verdict = self.validate_component(path, |domain| {
                on_progress(RunProgress::ManifestStarting {
                    domain,
                    index: index + 1,
                    total,
                })
            });
            on_progress(RunProgress::ManifestFinished { verdict: &verdict });
            verdicts.push(verdict);
        }

        RunReport {
            verdicts,
            duration: start.elapsed(),
        }
    }

    fn validate_component(&self, path: &Path, mut starting: impl FnMut(&str)) -> Verdict {
        let component = match ComponentFile::load(path) {
            Ok(component) => component,
            Err(reason) => {
                let domain = fallback_domain(path);
                starting(&domain);
                return Verdict::failed(
                    domain,
                    Issue::ComponentRead {
                        path: path.display().to_string(),
                        reason,
                    },
                );
            }
        };

        let manifest = match self.source.fetch_manifest(&component.manifest) {
            Ok(manifest) => manifest,
            Err(e) => {
                let domain = component.domain.unwrap_or_else(|| fallback_domain(path));
                starting(&domain);
                tracing::warn!("Failed to fetch manifest from {}: {:#}", component.manifest, e);
                return Verdict::failed(
                    domain,
                    Issue::ManifestFetch {
                        url: component.manifest,
                        reason: format!("{e:#}"),
                    },
                );
            }
        };

        starting(&manifest.domain);
        let requirements: RequirementSet = manifest.requirements.iter().collect();
        validate_requirements(&manifest.domain, &requirements, self.tooling, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::MockTooling;
    use anyhow::anyhow;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeSource {
        manifests: HashMap<String, Result<(String, Vec<String>), String>>,
    }

    impl FakeSource {
        fn with(mut self, url: &str, domain: &str, requirements: &[&str]) -> Self {
            let reqs = requirements.iter().map(|s| s.to_string()).collect();
            self.manifests
                .insert(url.to_string(), Ok((domain.to_string(), reqs)));
            self
        }

        fn failing(mut self, url: &str, reason: &str) -> Self {
            self.manifests
                .insert(url.to_string(), Err(reason.to_string()));
            self
        }
    }

    impl ManifestSource for FakeSource {
        fn fetch_manifest(&self, url: &str) -> anyhow::Result<Manifest> {
            match self.manifests.get(url) {
                Some(Ok((domain, requirements))) => Ok(Manifest {
                    domain: domain.clone(),
                    requirements: requirements.clone(),
                }),
                Some(Err(reason)) => Err(anyhow!(reason.clone())),
                None => Err(anyhow!("HTTP 404 Not Found fetching {url}")),
            }
        }
    }

    fn write_component(dir: &TempDir, file: &str, domain: &str, url: &str) -> PathBuf {
        let path = dir.path().join(file);
        fs::write(
            &path,
            format!(r#"{{"domain": "{domain}", "manifest": "{url}"}}"#),
        )
        .unwrap();
        path
    }

    fn index() -> StandardLibraryIndex {
        StandardLibraryIndex::load(&["3.8"]).unwrap()
    }

    #[test]
    fn empty_run_passes() {
        let source = FakeSource::default();
        let tooling = MockTooling::new();
        let index = index();
        let report = ManifestRunner::new(&source, &tooling, &index).run(&[]);

        assert!(report.passed());
        assert!(report.verdicts.is_empty());
    }

    #[test]
    fn one_failure_fails_run_but_all_are_attempted() {
        let temp = TempDir::new().unwrap();
        let a = write_component(&temp, "a.json", "alpha", "https://m/a");
        let b = write_component(&temp, "b.json", "beta", "https://m/b");
        let source = FakeSource::default()
            .with("https://m/a", "alpha", &["asyncio"])
            .with("https://m/b", "beta", &["six"]);
        let tooling = MockTooling::new()
            .with_tree("asyncio", "asyncio==3.4.3\n")
            .with_tree("six", "six==1.16.0\n");
        let index = index();

        let report = ManifestRunner::new(&source, &tooling, &index).run(&[b, a]);

        assert!(!report.passed());
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.verdicts[0].domain, "alpha");
        assert!(!report.verdicts[0].passed());
        assert_eq!(report.verdicts[1].domain, "beta");
        assert!(report.verdicts[1].passed());
    }

    #[test]
    fn fetch_failure_uses_component_domain() {
        let temp = TempDir::new().unwrap();
        let path = write_component(&temp, "lights.json", "lights", "https://m/lights");
        let source = FakeSource::default().failing("https://m/lights", "timed out");
        let tooling = MockTooling::new();
        let index = index();

        let report = ManifestRunner::new(&source, &tooling, &index).run(&[path]);

        let verdict = &report.verdicts[0];
        assert_eq!(verdict.domain, "lights");
        assert_eq!(
            verdict.issues,
            vec![Issue::ManifestFetch {
                url: "https://m/lights".into(),
                reason: "timed out".into(),
            }]
        );
        assert!(tooling.installs().is_empty());
    }

    #[test]
    fn unreadable_component_fails_with_file_stem() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "not json").unwrap();
        let source = FakeSource::default();
        let tooling = MockTooling::new();
        let index = index();

        let report = ManifestRunner::new(&source, &tooling, &index).run(&[path]);

        assert_eq!(report.verdicts[0].domain, "broken");
        assert!(matches!(
            report.verdicts[0].issues[0],
            Issue::ComponentRead { .. }
        ));
    }

    #[test]
    fn progress_reports_each_manifest() {
        let temp = TempDir::new().unwrap();
        let a = write_component(&temp, "a.json", "alpha", "https://m/a");
        let source = FakeSource::default().with("https://m/a", "alpha", &[]);
        let tooling = MockTooling::new();
        let index = index();

        let mut events = Vec::new();
        ManifestRunner::new(&source, &tooling, &index).run_with_progress(&[a], |event| {
            events.push(match event {
                RunProgress::ManifestStarting { domain, index, total } => {
                    format!("start {domain} {index}/{total}")
                }
                RunProgress::ManifestFinished { verdict } => {
                    format!("done {} {}", verdict.domain, verdict.passed())
                }
            })
        });

        assert_eq!(events, vec!["start alpha 1/1", "done alpha true"]);
    }
}

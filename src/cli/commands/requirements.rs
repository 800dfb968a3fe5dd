//! Requirements validation command.
//!
//! The `reqgate requirements` command reads changed file paths on stdin,
//! validates the manifest of every changed component, and prints a report.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::cli::args::RequirementsArgs;
use crate::component::{collect_changed, ManifestFetcher};
use crate::config::ValidatorConfig;
use crate::error::{ReqgateError, Result};
use crate::report::write_report;
use crate::requirements::{ProcessTooling, StandardLibraryIndex};
use crate::runner::{ManifestRunner, RunProgress};

use super::dispatcher::{read_changed_paths, resolve_path, validated, Command, CommandResult};

/// The requirements command implementation.
pub struct RequirementsCommand {
    project_root: PathBuf,
    config: ValidatorConfig,
    args: RequirementsArgs,
    use_color: bool,
}

impl RequirementsCommand {
    /// Create a new requirements command.
    pub fn new(project_root: &Path, config: ValidatorConfig, args: RequirementsArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
            use_color: false,
        }
    }

    /// Enable or disable ANSI colors in human output.
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Apply command-line overrides on top of the file config.
    fn effective_config(&self) -> Result<ValidatorConfig> {
        let mut config = self.config.clone();
        let args = &self.args;

        if !args.runtime_versions.is_empty() {
            config.runtime_versions = args.runtime_versions.clone();
        }
        if let Some(dir) = &args.components_dir {
            config.components_dir = dir.clone();
        }
        if let Some(secs) = args.manifest_timeout {
            config.manifest_timeout_secs = secs;
        }
        if let Some(secs) = args.tool_timeout {
            config.tool_timeout_secs = secs;
        }
        if let Some(python) = &args.python {
            config.python = python.clone();
        }
        if let Some(tree) = &args.pipdeptree {
            config.dependency_tree = tree.clone();
        }

        validated(config)
    }
}

impl Command for RequirementsCommand {
    fn execute(&self, input: &mut dyn Read, out: &mut dyn Write) -> Result<CommandResult> {
        let config = self.effective_config()?;

        let index = StandardLibraryIndex::load(&config.runtime_versions)?;
        let tooling = ProcessTooling::new(&config.python, &config.dependency_tree)
            .with_timeout(config.tool_timeout());
        let fetcher = ManifestFetcher::new(config.manifest_timeout())?;

        let changed = read_changed_paths(input)?;
        let components_dir = resolve_path(&self.project_root, &config.components_dir);
        let components = collect_changed(&changed, &self.project_root, &components_dir)?;
        tracing::debug!(
            "{} changed component file(s) under {}",
            components.len(),
            components_dir.display()
        );

        let runner = ManifestRunner::new(&fetcher, &tooling, &index);
        let report = runner.run_with_progress(&components, |event| match event {
            RunProgress::ManifestStarting {
                domain,
                index,
                total,
            } => tracing::info!("[{}/{}] Validating {}", index, total, domain),
            RunProgress::ManifestFinished { verdict } => {
                if verdict.passed() {
                    tracing::debug!("{} passed", verdict.domain);
                } else {
                    tracing::debug!(
                        "{} failed with {} error(s)",
                        verdict.domain,
                        verdict.errors().count()
                    );
                }
            }
        });

        write_report(&report, self.args.format, self.use_color, out).map_err(ReqgateError::Io)?;

        if report.passed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    fn run(temp: &TempDir, args: RequirementsArgs, input: &str) -> (Result<CommandResult>, String) {
        let cmd = RequirementsCommand::new(temp.path(), ValidatorConfig::default(), args);
        let mut out = Vec::new();
        let result = cmd.execute(&mut input.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn overrides_replace_file_values() {
        let args = RequirementsArgs {
            runtime_versions: vec!["3.11".into()],
            tool_timeout: Some(5),
            python: Some("python3.11".into()),
            ..Default::default()
        };
        let cmd = RequirementsCommand::new(Path::new("/repo"), ValidatorConfig::default(), args);

        let config = cmd.effective_config().unwrap();

        assert_eq!(config.runtime_versions, vec!["3.11"]);
        assert_eq!(config.tool_timeout_secs, 5);
        assert_eq!(config.python, "python3.11");
        assert_eq!(config.dependency_tree, "pipdeptree");
        assert_eq!(config.manifest_timeout_secs, 10);
    }

    #[test]
    fn unsupported_runtime_version_is_rejected() {
        let temp = TempDir::new().unwrap();
        let args = RequirementsArgs {
            runtime_versions: vec!["2.7".into()],
            ..Default::default()
        };

        let (result, _) = run(&temp, args, "");

        assert!(matches!(
            result,
            Err(ReqgateError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn no_changed_components_passes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("components")).unwrap();

        let (result, output) = run(&temp, RequirementsArgs::default(), "README.md\n");

        assert_eq!(result.unwrap().exit_code, 0);
        assert!(output.contains("Integrations to validate: 0"));
    }

    #[test]
    fn undecodable_input_is_a_vacuous_pass() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("components")).unwrap();
        let cmd = RequirementsCommand::new(
            temp.path(),
            ValidatorConfig::default(),
            RequirementsArgs::default(),
        );
        let mut out = Vec::new();

        let result = cmd
            .execute(&mut &[0xff_u8, 0xfe, b'\n'][..], &mut out)
            .unwrap();

        assert_eq!(result.exit_code, 0);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Integrations to validate: 0"));
    }

    #[test]
    fn relative_paths_resolve_against_project_root() {
        let temp = TempDir::new().unwrap();
        let components = temp.path().join("components");
        fs::create_dir(&components).unwrap();
        fs::write(components.join("broken.json"), "{ not json").unwrap();

        let (result, output) = run(
            &temp,
            RequirementsArgs::default(),
            "components/broken.json\n",
        );

        assert_eq!(result.unwrap().exit_code, 1);
        assert!(output.contains("Integrations to validate: 1"));
        assert!(output.contains("Validating broken:"));
    }

    #[test]
    fn unreadable_component_fails_the_run() {
        let temp = TempDir::new().unwrap();
        let components = temp.path().join("components");
        fs::create_dir(&components).unwrap();
        let broken = components.join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let args = RequirementsArgs {
            format: OutputFormat::Json,
            ..Default::default()
        };

        let (result, output) = run(&temp, args, &format!("{}\n", broken.display()));

        assert_eq!(result.unwrap().exit_code, 1);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["manifests"][0]["domain"], "broken");
        assert_eq!(parsed["manifests"][0]["issues"][0]["kind"], "component-read");
    }
}

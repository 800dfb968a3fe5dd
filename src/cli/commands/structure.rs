//! Component structure command.
//!
//! The `reqgate structure` command checks that changed component files
//! carry the keys the registry needs. Nothing is fetched or installed.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use console::style;

use crate::cli::args::StructureArgs;
use crate::component::{collect_structure_targets, validate_structure};
use crate::config::ValidatorConfig;
use crate::error::Result;

use super::dispatcher::{read_changed_paths, resolve_path, Command, CommandResult};

/// The structure command implementation.
pub struct StructureCommand {
    project_root: PathBuf,
    config: ValidatorConfig,
    args: StructureArgs,
}

impl StructureCommand {
    /// Create a new structure command.
    pub fn new(project_root: &Path, config: ValidatorConfig, args: StructureArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    fn components_dir(&self) -> PathBuf {
        let dir = self
            .args
            .components_dir
            .as_ref()
            .unwrap_or(&self.config.components_dir);
        resolve_path(&self.project_root, dir)
    }
}

impl Command for StructureCommand {
    fn execute(&self, input: &mut dyn Read, out: &mut dyn Write) -> Result<CommandResult> {
        let changed = read_changed_paths(input)?;

        let targets = collect_structure_targets(&changed, &self.components_dir());
        let mut failed = 0;

        for path in &targets {
            let report = validate_structure(path);
            writeln!(out, "Validating {}", report.display_name())?;
            for problem in &report.problems {
                writeln!(out, "  {}", style(problem).red())?;
            }
            if !report.ok() {
                failed += 1;
            }
        }

        if failed > 0 {
            tracing::warn!("{} of {} component file(s) invalid", failed, targets.len());
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

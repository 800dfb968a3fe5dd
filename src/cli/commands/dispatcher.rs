//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, validate, ValidatorConfig};
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `input` - Standard input (changed file paths, one per line)
    /// * `out` - Where the report is written
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, input: &mut dyn Read, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    use_color: bool,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            use_color: false,
        }
    }

    /// Enable or disable ANSI colors in human output.
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(
        &self,
        cli: &Cli,
        input: &mut dyn Read,
        out: &mut dyn Write,
    ) -> Result<CommandResult> {
        match &cli.command {
            Commands::Requirements(args) => {
                let config = self.load_config(cli)?;
                let cmd = super::requirements::RequirementsCommand::new(
                    &self.project_root,
                    config,
                    args.clone(),
                )
                .with_color(self.use_color);
                cmd.execute(input, out)
            }
            Commands::Structure(args) => {
                let config = self.load_config(cli)?;
                let cmd = super::structure::StructureCommand::new(
                    &self.project_root,
                    config,
                    args.clone(),
                );
                cmd.execute(input, out)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(input, out)
            }
        }
    }

    fn load_config(&self, cli: &Cli) -> Result<ValidatorConfig> {
        let explicit = cli
            .config
            .as_deref()
            .map(|path| resolve_path(&self.project_root, path));
        let config = load_config(explicit.as_deref(), &self.project_root)?;
        tracing::debug!("Loaded config: {:?}", config);
        Ok(config)
    }
}

/// Resolve `path` against `root` unless it is already absolute.
pub(crate) fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Read the changed-path list from `input`.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; such
/// lines match no component file.
pub(crate) fn read_changed_paths(input: &mut dyn Read) -> Result<String> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!("Changed-file list is not valid UTF-8; undecodable paths are ignored");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Validate a config after overrides were applied.
pub(crate) fn validated(config: ValidatorConfig) -> Result<ValidatorConfig> {
    validate(&config)?;
    Ok(config)
}

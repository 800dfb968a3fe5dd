//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::report::OutputFormat;

/// Reqgate - CI validation of component requirements.
#[derive(Debug, Parser)]
#[command(name = "reqgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .reqgate.yml)
    #[arg(short, long, global = true, env = "REQGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate requirements of changed components (paths read from stdin)
    Requirements(RequirementsArgs),

    /// Validate the structure of changed component files (paths read from stdin)
    Structure(StructureArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `requirements` command.
///
/// Every option left unset falls back to the config file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RequirementsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, env = "REQGATE_FORMAT")]
    pub format: OutputFormat,

    /// Runtime version to check against (repeatable)
    #[arg(
        long = "runtime-version",
        env = "REQGATE_RUNTIME_VERSIONS",
        value_delimiter = ','
    )]
    pub runtime_versions: Vec<String>,

    /// Directory holding component files
    #[arg(long, env = "REQGATE_COMPONENTS_DIR")]
    pub components_dir: Option<PathBuf>,

    /// Manifest fetch timeout in seconds
    #[arg(long, env = "REQGATE_MANIFEST_TIMEOUT")]
    pub manifest_timeout: Option<u64>,

    /// Installer and inspector timeout in seconds
    #[arg(long, env = "REQGATE_TOOL_TIMEOUT")]
    pub tool_timeout: Option<u64>,

    /// Python executable used to run pip
    #[arg(long, env = "REQGATE_PYTHON")]
    pub python: Option<String>,

    /// Dependency-tree inspector executable
    #[arg(long, env = "REQGATE_PIPDEPTREE")]
    pub pipdeptree: Option<String>,
}

/// Arguments for the `structure` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StructureArgs {
    /// Directory holding component files
    #[arg(long, env = "REQGATE_COMPONENTS_DIR")]
    pub components_dir: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

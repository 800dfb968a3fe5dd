//! Run report formatters.
//!
//! This module provides formatters for writing a [`RunReport`] in different
//! formats (human-readable, JSON).

pub mod human;
pub mod json;

use crate::runner::RunReport;
use std::io::Write;

/// Output format for run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Trait for formatting a run report.
pub trait ReportFormatter {
    /// Format the report to the given writer.
    fn format<W: Write + ?Sized>(
        &self,
        report: &RunReport,
        writer: &mut W,
    ) -> std::io::Result<()>;
}

/// Whether to emit ANSI colors on stdout.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

/// Write `report` to `writer` in `format`.
pub fn write_report<W: Write + ?Sized>(
    report: &RunReport,
    format: OutputFormat,
    use_color: bool,
    writer: &mut W,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => HumanFormatter::new(use_color).format(report, writer),
        OutputFormat::Json => JsonFormatter::new().format(report, writer),
    }
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;

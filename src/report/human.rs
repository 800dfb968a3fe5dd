//! Human-readable output formatter.
//!
//! One block per manifest: a `Validating <domain>:` header, then either
//! `OK!` or one line per issue followed by `FAILED`.

use super::ReportFormatter;
use crate::requirements::Severity;
use crate::runner::RunReport;
use console::style;
use std::io::Write;

/// Formats run reports for terminal display.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, text: &str, severity: Option<Severity>) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match severity {
            None => style(text).green().bold().to_string(),
            Some(Severity::Warning) => style(text).yellow().to_string(),
            Some(Severity::Error) => style(text).red().bold().to_string(),
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write + ?Sized>(
        &self,
        report: &RunReport,
        writer: &mut W,
    ) -> std::io::Result<()> {
        writeln!(writer, "Validating requirements")?;
        writeln!(writer)?;
        writeln!(writer, "Integrations to validate: {}", report.verdicts.len())?;

        for verdict in &report.verdicts {
            writeln!(writer)?;
            writeln!(writer, "Validating {}:", verdict.domain)?;

            for issue in &verdict.issues {
                let severity = issue.severity();
                let label = match severity {
                    Severity::Warning => "warning",
                    Severity::Error => "error",
                };
                writeln!(writer, "  {}: {}", self.paint(label, Some(severity)), issue)?;
            }

            if verdict.passed() {
                writeln!(writer, "{}", self.paint("OK!", None))?;
            } else {
                writeln!(writer, "{}", self.paint("FAILED", Some(Severity::Error)))?;
            }
        }

        let failed = report.failed_count();
        if failed > 0 {
            writeln!(writer)?;
            writeln!(
                writer,
                "{} of {} integration(s) failed validation",
                failed,
                report.verdicts.len()
            )?;
        }

        Ok(())
    }
}

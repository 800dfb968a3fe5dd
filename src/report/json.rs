//! JSON output formatter.
//!
//! Machine-readable summary of a run for CI annotations and dashboards.

use super::ReportFormatter;
use crate::requirements::Severity;
use crate::runner::RunReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Formats run reports as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    passed: bool,
    generated_at: DateTime<Utc>,
    duration_ms: u128,
    manifests: Vec<JsonManifest<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonManifest<'a> {
    domain: &'a str,
    passed: bool,
    resolved: Vec<&'a str>,
    issues: Vec<JsonIssue>,
}

#[derive(Serialize)]
struct JsonIssue {
    kind: &'static str,
    severity: Severity,
    message: String,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    passed: usize,
    failed: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write + ?Sized>(
        &self,
        report: &RunReport,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let manifests: Vec<_> = report
            .verdicts
            .iter()
            .map(|v| JsonManifest {
                domain: &v.domain,
                passed: v.passed(),
                resolved: v.resolved.iter().map(String::as_str).collect(),
                issues: v
                    .issues
                    .iter()
                    .map(|i| JsonIssue {
                        kind: i.kind(),
                        severity: i.severity(),
                        message: i.to_string(),
                    })
                    .collect(),
            })
            .collect();

        let failed = report.failed_count();
        let output = JsonOutput {
            passed: report.passed(),
            generated_at: Utc::now(),
            duration_ms: report.duration.as_millis(),
            summary: JsonSummary {
                total: manifests.len(),
                passed: manifests.len() - failed,
                failed,
            },
            manifests,
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}

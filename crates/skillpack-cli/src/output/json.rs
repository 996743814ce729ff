//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use skillpack_core::PackageReport;
use std::io::Write;
use std::io::{self};
use std::path::Path;

const OPERATION: &str = "package";

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PackageOutput {
    archive_path: String,
    files_added: usize,
    files_excluded: usize,
    patterns_used: usize,
    bytes_written: u64,
    archive_size: u64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&PackageReport> for PackageOutput {
    fn from(report: &PackageReport) -> Self {
        Self {
            archive_path: report.archive_path.display().to_string(),
            files_added: report.files_added,
            files_excluded: report.files_excluded,
            patterns_used: report.patterns_used,
            bytes_written: report.bytes_written,
            archive_size: report.archive_size,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

// Only the final result or error is emitted so stdout holds one document.
impl OutputFormatter for JsonFormatter {
    fn format_package_start(&self, _source: &Path, _output_dir: Option<&Path>) {}

    fn format_validation(&self, _message: &str) {}

    fn format_patterns(&self, _count: usize, _rules_file: &str) {}

    fn format_package_result(&self, report: &PackageReport, _rules_file: &str) -> Result<()> {
        Self::output(&JsonOutput::success(OPERATION, PackageOutput::from(report)))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error(OPERATION, format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_success(&self, _message: &str) {}

    fn format_warning(&self, _message: &str) {}
}

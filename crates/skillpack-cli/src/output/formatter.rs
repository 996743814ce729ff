//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use skillpack_core::PackageReport;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Announce the skill directory about to be packaged
    fn format_package_start(&self, source: &Path, output_dir: Option<&Path>);

    /// Report a successful validation
    fn format_validation(&self, message: &str);

    /// Report the exclusion patterns loaded from the rules file
    fn format_patterns(&self, count: usize, rules_file: &str);

    /// Format packaging result
    fn format_package_result(&self, report: &PackageReport, rules_file: &str) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format success message
    fn format_success(&self, message: &str);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

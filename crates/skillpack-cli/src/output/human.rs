//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use skillpack_core::PackageReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn line(&self, text: &str) {
        if !self.quiet {
            let _ = self.term.write_line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_package_start(&self, source: &Path, output_dir: Option<&Path>) {
        self.line(&format!("Packaging skill: {}", source.display()));
        if let Some(dir) = output_dir {
            self.line(&format!("  Output directory: {}", dir.display()));
        }
        self.line("");
        self.line("Validating skill...");
    }

    fn format_validation(&self, message: &str) {
        self.format_success(message);
        self.line("");
    }

    fn format_patterns(&self, count: usize, rules_file: &str) {
        self.line(&format!(
            "Using {rules_file} with {} exclusion patterns",
            Self::format_number(count)
        ));
    }

    fn format_package_result(&self, report: &PackageReport, rules_file: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if report.files_excluded > 0 {
            self.line(&format!(
                "  Excluded: {} files (per {rules_file})",
                Self::format_number(report.files_excluded)
            ));
        }

        self.line("");
        self.format_success(&format!(
            "Successfully packaged skill to: {}",
            report.archive_path.display()
        ));
        self.line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        self.line(&format!(
            "  Files excluded:   {}",
            Self::format_number(report.files_excluded)
        ));
        self.line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));
        self.line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.archive_size)
        ));

        if self.verbose {
            self.line(&format!("  Patterns:         {}", report.patterns_used));
            self.line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() {
            self.line("");
            if self.use_colors {
                self.line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.line("Warnings:");
            }
            for warning in &report.warnings {
                self.format_warning(warning);
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_success(&self, message: &str) {
        if self.use_colors {
            self.line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            self.line(message);
        }
    }

    fn format_warning(&self, message: &str) {
        if self.use_colors {
            self.line(&format!("  {} {message}", style("⚠").yellow().bold()));
        } else {
            self.line(&format!("  WARNING: {message}"));
        }
    }
}

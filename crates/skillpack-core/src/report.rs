//! Packaging operation reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a packaging operation.
///
/// Built once per run and handed back to the caller.
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    /// Path of the written archive.
    pub archive_path: PathBuf,

    /// Number of regular files written to the archive.
    pub files_added: usize,

    /// Number of regular files left out by exclusion patterns.
    pub files_excluded: usize,

    /// Number of exclusion patterns in effect.
    pub patterns_used: usize,

    /// Total uncompressed bytes written to the archive.
    pub bytes_written: u64,

    /// Size of the finished archive file in bytes.
    pub archive_size: u64,

    /// Duration of the archive build.
    pub duration: Duration,

    /// Warnings generated while building.
    pub warnings: Vec<String>,
}

impl PackageReport {
    /// Creates an empty report for the given archive path.
    #[must_use]
    pub fn new(archive_path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            ..Self::default()
        }
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of regular files seen under the source directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use skillpack_core::PackageReport;
    ///
    /// let mut report = PackageReport::new("demo.skill");
    /// report.files_added = 2;
    /// report.files_excluded = 1;
    /// assert_eq!(report.total_files(), 3);
    /// ```
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.files_added + self.files_excluded
    }
}

/// Callback trait for progress reporting while an archive is built.
///
/// # Examples
///
/// ```
/// use skillpack_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, path: &Path) {
///         println!("  Added: {}", path.display());
///     }
///
///     fn on_entry_excluded(&mut self, _path: &Path, _pattern: &str) {}
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before an entry is written.
    ///
    /// # Arguments
    ///
    /// * `path` - Archive-internal path of the entry
    /// * `total` - Number of entries that will be written
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for each chunk of file content copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called once an entry has been fully written.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called for each file left out, with the pattern that excluded it.
    ///
    /// `path` is relative to the source directory.
    fn on_entry_excluded(&mut self, path: &Path, pattern: &str);

    /// Called once the archive has been finalized.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_entry_excluded(&mut self, _path: &Path, _pattern: &str) {}

    fn on_complete(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = PackageReport::new("demo.skill");
        assert_eq!(report.archive_path, PathBuf::from("demo.skill"));
        assert_eq!(report.files_added, 0);
        assert_eq!(report.files_excluded, 0);
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_add_warning() {
        let mut report = PackageReport::new("demo.skill");
        report.add_warning("Skipped symlink: link");
        assert!(report.has_warnings());
        assert_eq!(report.warnings.len(), 1);
    }
}

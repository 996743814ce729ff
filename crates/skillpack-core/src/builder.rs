//! Archive building from a filtered directory walk.
//!
//! The builder walks the source directory in file-name order, drops files
//! matched by an exclusion pattern, and writes every remaining regular file
//! into a deflate-compressed ZIP container. Entry names start with the
//! source directory's own name so that unpacking recreates that folder.

use crate::PackageError;
use crate::ProgressCallback;
use crate::Result;
use crate::config::PackageConfig;
use crate::matcher;
use crate::matcher::ExclusionPattern;
use crate::report::NoopProgress;
use crate::report::PackageReport;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// A regular file that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Full filesystem path of the file.
    pub path: PathBuf,
    /// `/`-joined entry name, prefixed with the source directory name.
    pub archive_name: String,
}

/// Builds an archive at `output` from `source`.
///
/// An existing file at `output` is truncated.
///
/// # Examples
///
/// ```no_run
/// use skillpack_core::ExclusionPattern;
/// use skillpack_core::PackageConfig;
/// use skillpack_core::builder::build_archive;
/// use std::path::Path;
///
/// let patterns = vec![ExclusionPattern::new("build/")];
/// let report = build_archive(
///     Path::new("dist/my-skill.skill"),
///     Path::new("/skills/my-skill"),
///     &patterns,
///     &PackageConfig::default(),
/// )?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), skillpack_core::PackageError>(())
/// ```
///
/// # Errors
///
/// Returns [`PackageError::ArchiveWrite`] if the archive cannot be created
/// or written, or if the source tree cannot be read while building.
pub fn build_archive(
    output: &Path,
    source: &Path,
    patterns: &[ExclusionPattern],
    config: &PackageConfig,
) -> Result<PackageReport> {
    build_archive_with_progress(output, source, patterns, config, &mut NoopProgress)
}

/// Builds an archive at `output` from `source`, reporting progress.
///
/// `progress` receives one `on_entry_start`/`on_entry_complete` pair per
/// added file, `on_entry_excluded` per excluded file, and `on_complete`
/// once the archive is finalized.
///
/// # Errors
///
/// Same as [`build_archive`]. A failure part way through may leave a
/// partial archive on disk.
pub fn build_archive_with_progress(
    output: &Path,
    source: &Path,
    patterns: &[ExclusionPattern],
    config: &PackageConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackageReport> {
    let start = Instant::now();
    let file = File::create(output).map_err(|e| PackageError::archive_write(output, e))?;

    let mut report = PackageReport::new(output);
    build_archive_internal(file, output, source, patterns, config, &mut report, progress)
        .map_err(|e| PackageError::archive_write(output, e))?;

    report.archive_size = fs::metadata(output)
        .map_err(|e| PackageError::archive_write(output, e))?
        .len();
    report.duration = start.elapsed();

    tracing::info!(
        archive = %output.display(),
        files_added = report.files_added,
        files_excluded = report.files_excluded,
        "archive written"
    );
    progress.on_complete();

    Ok(report)
}

/// Walks `source` and splits its regular files into planned entries and
/// excluded files.
///
/// Directories are not recorded as entries. Symlinks and special files are
/// neither added nor counted as excluded; symlinks leave a warning on the
/// report. The rules file at the source root is packaging input, not
/// content, and is skipped the same way, as is `output` when the archive
/// is written inside `source`. Names that are not valid UTF-8 are stored
/// lossily and leave a warning on the report.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be traversed or if `source`
/// has no final name component.
pub fn plan_entries(
    source: &Path,
    output: &Path,
    patterns: &[ExclusionPattern],
    config: &PackageConfig,
    report: &mut PackageReport,
    progress: &mut dyn ProgressCallback,
) -> io::Result<Vec<PlannedEntry>> {
    let base_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("source directory has no name: {}", source.display()),
            )
        })?;

    let own_archive = own_archive_path(source, output);

    let mut entries = Vec::new();
    for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let file_type = entry.file_type();
        let path = entry.path();

        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() {
            report.add_warning(format!("Skipped symlink: {}", path.display()));
            continue;
        }
        if !file_type.is_file() {
            tracing::debug!(path = %path.display(), "skipping special file");
            continue;
        }

        let Some(rel_path) = matcher::relative_path(path, source) else {
            continue;
        };
        if rel_path == config.ignore_file {
            continue;
        }
        if own_archive.as_deref() == Some(rel_path.as_str()) {
            tracing::debug!(path = %rel_path, "skipping archive being written");
            continue;
        }
        if path.strip_prefix(source).ok().and_then(Path::to_str).is_none() {
            tracing::warn!(path = %path.display(), "file name is not valid UTF-8");
            report.add_warning(format!(
                "Non-UTF-8 file name stored as {rel_path}: {}",
                path.display()
            ));
        }

        if let Some(pattern) = patterns.iter().find(|p| p.matches(&rel_path)) {
            tracing::debug!(path = %rel_path, pattern = %pattern, "excluded");
            report.files_excluded += 1;
            progress.on_entry_excluded(Path::new(&rel_path), pattern.as_str());
            continue;
        }

        entries.push(PlannedEntry {
            path: path.to_path_buf(),
            archive_name: format!("{base_name}/{rel_path}"),
        });
    }

    Ok(entries)
}

/// Returns the root-relative name of `output` if it lies inside `source`.
///
/// Both paths are canonicalized, so `output` must already exist to be
/// recognized.
fn own_archive_path(source: &Path, output: &Path) -> Option<String> {
    let root = fs::canonicalize(source).ok()?;
    let archive = fs::canonicalize(output).ok()?;
    matcher::relative_path(&archive, &root)
}

fn file_options(config: &PackageConfig) -> SimpleFileOptions {
    if config.compression_level == Some(0) {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        let level = config.compression_level.unwrap_or(6);
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level)))
    }
}

/// Writes all planned entries of `source` into `writer`.
///
/// The ZIP writer owns `writer`; it is dropped (and the underlying file
/// closed) on every return path.
fn build_archive_internal<W: Write + Seek>(
    writer: W,
    output: &Path,
    source: &Path,
    patterns: &[ExclusionPattern],
    config: &PackageConfig,
    report: &mut PackageReport,
    progress: &mut dyn ProgressCallback,
) -> io::Result<()> {
    let mut zip = ZipWriter::new(writer);
    let options = file_options(config);
    report.patterns_used = patterns.len();

    let entries = plan_entries(source, output, patterns, config, report, progress)?;
    let total = entries.len();

    // Reused across files
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for (idx, entry) in entries.iter().enumerate() {
        let archive_path = Path::new(&entry.archive_name);
        progress.on_entry_start(archive_path, total, idx + 1);
        let bytes = add_file(&mut zip, entry, &options, progress, &mut buffer)?;
        tracing::debug!(entry = %entry.archive_name, bytes, "added");
        report.files_added += 1;
        report.bytes_written += bytes;
        progress.on_entry_complete(archive_path);
    }

    zip.finish()
        .map_err(|e| io::Error::other(format!("failed to finish ZIP archive: {e}")))?;

    Ok(())
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &PlannedEntry,
    options: &SimpleFileOptions,
    progress: &mut dyn ProgressCallback,
    buffer: &mut [u8],
) -> io::Result<u64> {
    let mut file = File::open(&entry.path)?;

    let file_options = {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = file.metadata()?.permissions().mode();
            options.unix_permissions(mode)
        }
        #[cfg(not(unix))]
        {
            *options
        }
    };

    zip.start_file(entry.archive_name.as_str(), file_options)
        .map_err(|e| io::Error::other(format!("failed to start file in ZIP: {e}")))?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    Ok(bytes_written)
}

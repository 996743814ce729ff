//! End-to-end packaging pipeline.
//!
//! Packaging runs in two phases. [`Packager::prepare`] resolves the source
//! directory, checks for the descriptor file, runs the validator, and loads
//! exclusion rules; nothing is written. [`Packager::build`] then creates the
//! output directory and writes the archive.

use crate::PackageError;
use crate::ProgressCallback;
use crate::Result;
use crate::builder;
use crate::config::PackageConfig;
use crate::ignore;
use crate::matcher::ExclusionPattern;
use crate::report::NoopProgress;
use crate::report::PackageReport;
use crate::validation::SkillValidator;
use crate::validation::Validator;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// What to package and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Directory to package.
    pub source_dir: PathBuf,
    /// Directory receiving the archive; the current directory when `None`.
    pub output_dir: Option<PathBuf>,
}

impl PackageRequest {
    /// Creates a request writing into the current directory.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: None,
        }
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }
}

/// A validated request, ready to be written.
#[derive(Debug, Clone)]
pub struct PreparedPackage {
    /// Canonical source directory.
    pub source_dir: PathBuf,
    /// Directory the archive is written into.
    pub output_dir: PathBuf,
    /// Full path of the archive to write.
    pub archive_path: PathBuf,
    /// Exclusion patterns loaded from the rules file.
    pub patterns: Vec<ExclusionPattern>,
    /// Message reported by the validator.
    pub validation_message: String,
}

/// Packages skill directories.
///
/// # Examples
///
/// ```no_run
/// use skillpack_core::PackageRequest;
/// use skillpack_core::Packager;
///
/// let packager = Packager::default();
/// let request = PackageRequest::new("skills/my-skill").with_output_dir("dist");
/// let report = packager.package(&request)?;
/// println!("{} ({} files)", report.archive_path.display(), report.files_added);
/// # Ok::<(), skillpack_core::PackageError>(())
/// ```
pub struct Packager<'a> {
    config: PackageConfig,
    validator: Box<dyn Validator + 'a>,
}

impl Default for Packager<'_> {
    fn default() -> Self {
        Self::new(PackageConfig::default())
    }
}

impl<'a> Packager<'a> {
    /// Creates a packager validating with [`SkillValidator`].
    #[must_use]
    pub fn new(config: PackageConfig) -> Self {
        let validator = SkillValidator::new(config.descriptor_file.clone());
        Self {
            config,
            validator: Box::new(validator),
        }
    }

    /// Replaces the validator.
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'a) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// Checks the request without touching the output location.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::NotFound`], [`PackageError::NotADirectory`],
    /// [`PackageError::MissingDescriptor`], or
    /// [`PackageError::ValidationFailed`].
    pub fn prepare(&self, request: &PackageRequest) -> Result<PreparedPackage> {
        let source_dir = resolve_source(&request.source_dir, &self.config)?;

        let outcome = self.validator.validate(&source_dir);
        if !outcome.valid {
            return Err(PackageError::ValidationFailed {
                message: outcome.message,
            });
        }
        tracing::info!(source = %source_dir.display(), "validation passed");

        let output_dir = resolve_output_dir(request.output_dir.as_deref());
        let archive_path = output_dir.join(archive_file_name(&source_dir, &self.config));
        let patterns = ignore::load_patterns(&source_dir, &self.config.ignore_file);

        Ok(PreparedPackage {
            source_dir,
            output_dir,
            archive_path,
            patterns,
            validation_message: outcome.message,
        })
    }

    /// Writes the archive for a prepared request.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::ArchiveWrite`] if the output directory or the
    /// archive cannot be created or written.
    pub fn build(
        &self,
        prepared: &PreparedPackage,
        progress: &mut dyn ProgressCallback,
    ) -> Result<PackageReport> {
        fs::create_dir_all(&prepared.output_dir)
            .map_err(|e| PackageError::archive_write(&prepared.archive_path, e))?;

        builder::build_archive_with_progress(
            &prepared.archive_path,
            &prepared.source_dir,
            &prepared.patterns,
            &self.config,
            progress,
        )
    }

    /// Prepares and builds in one step.
    ///
    /// # Errors
    ///
    /// Any error from [`Packager::prepare`] or [`Packager::build`].
    pub fn package(&self, request: &PackageRequest) -> Result<PackageReport> {
        self.package_with_progress(request, &mut NoopProgress)
    }

    /// Prepares and builds in one step, reporting progress.
    ///
    /// # Errors
    ///
    /// Any error from [`Packager::prepare`] or [`Packager::build`].
    pub fn package_with_progress(
        &self,
        request: &PackageRequest,
        progress: &mut dyn ProgressCallback,
    ) -> Result<PackageReport> {
        let prepared = self.prepare(request)?;
        self.build(&prepared, progress)
    }
}

/// Packages `request` with default configuration and validation.
///
/// # Errors
///
/// See [`Packager::package`].
pub fn package_skill(request: &PackageRequest) -> Result<PackageReport> {
    Packager::default().package(request)
}

/// Canonicalizes `path` and checks that it is a directory holding the
/// descriptor file.
///
/// # Errors
///
/// Returns [`PackageError::NotFound`], [`PackageError::NotADirectory`], or
/// [`PackageError::MissingDescriptor`].
pub fn resolve_source(path: &Path, config: &PackageConfig) -> Result<PathBuf> {
    let resolved = fs::canonicalize(path).map_err(|_| PackageError::NotFound {
        path: path.to_path_buf(),
    })?;

    if !resolved.is_dir() {
        return Err(PackageError::NotADirectory { path: resolved });
    }

    if !resolved.join(&config.descriptor_file).exists() {
        return Err(PackageError::MissingDescriptor {
            directory: resolved,
            descriptor: config.descriptor_file.clone(),
        });
    }

    Ok(resolved)
}

/// Makes the output directory absolute against the current directory.
///
/// The directory may not exist yet, so it is not canonicalized.
fn resolve_output_dir(output_dir: Option<&Path>) -> PathBuf {
    let dir = output_dir.unwrap_or_else(|| Path::new("."));
    std::path::absolute(dir).unwrap_or_else(|_| {
        env::current_dir().map_or_else(|_| dir.to_path_buf(), |cwd| cwd.join(dir))
    })
}

/// Returns `<directory name>.<extension>` for a source directory.
#[must_use]
pub fn archive_file_name(source_dir: &Path, config: &PackageConfig) -> String {
    let name = source_dir
        .file_name()
        .map_or_else(|| "skill".into(), |name| name.to_string_lossy());
    format!("{name}.{}", config.archive_extension)
}

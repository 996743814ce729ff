//! Error types for skill packaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackageError`.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Errors that can occur while packaging a skill directory.
///
/// Every variant is terminal for the current packaging run. The first four
/// are raised before the archive file is opened, so they never leave any
/// output behind.
#[derive(Error, Debug)]
pub enum PackageError {
    /// Source path does not exist.
    #[error("skill folder not found: {path}")]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Source path exists but is not a directory.
    #[error("path is not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Required descriptor file is absent from the source directory.
    #[error("{descriptor} not found in {directory}")]
    MissingDescriptor {
        /// The source directory that was searched.
        directory: PathBuf,
        /// Name of the descriptor file that was expected.
        descriptor: String,
    },

    /// The validator rejected the source directory.
    #[error("validation failed: {message}")]
    ValidationFailed {
        /// Message reported by the validator.
        message: String,
    },

    /// The archive could not be created or written.
    #[error("failed to write archive {path}: {source}")]
    ArchiveWrite {
        /// Path of the archive being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl PackageError {
    /// Returns `true` if the error was raised before any archive I/O began.
    ///
    /// # Examples
    ///
    /// ```
    /// use skillpack_core::PackageError;
    /// use std::path::PathBuf;
    ///
    /// let err = PackageError::NotFound {
    ///     path: PathBuf::from("missing"),
    /// };
    /// assert!(err.is_precondition());
    ///
    /// let err = PackageError::ArchiveWrite {
    ///     path: PathBuf::from("out.skill"),
    ///     source: std::io::Error::other("disk full"),
    /// };
    /// assert!(!err.is_precondition());
    /// ```
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::NotADirectory { .. }
                | Self::MissingDescriptor { .. }
                | Self::ValidationFailed { .. }
        )
    }

    pub(crate) fn archive_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ArchiveWrite {
            path: path.into(),
            source,
        }
    }
}

//! Error conversion utilities for CLI.
//!
//! Converts skillpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use skillpack_core::PackageError;
use std::path::Path;

/// Converts `PackageError` to user-friendly anyhow error with context
pub fn convert_package_error(err: PackageError, source: &Path) -> anyhow::Error {
    match err {
        PackageError::NotFound { path } => {
            anyhow!("Skill folder not found: {}", path.display())
        }
        PackageError::NotADirectory { path } => {
            anyhow!("Path is not a directory: {}", path.display())
        }
        PackageError::MissingDescriptor {
            directory,
            descriptor,
        } => {
            anyhow!(
                "{descriptor} not found in {}\n\
                 HINT: A skill directory needs a {descriptor} file at its root.",
                directory.display()
            )
        }
        PackageError::ValidationFailed { message } => {
            anyhow!(
                "Validation failed for '{}': {message}\n\
                 HINT: Please fix validation errors before packaging.",
                source.display()
            )
        }
        PackageError::ArchiveWrite { path, source: io_err } => {
            anyhow!(
                "Error creating archive '{}': {io_err}\n\
                 HINT: Check that the output directory is writable and has free space.",
                path.display()
            )
        }
    }
}

/// Adds context to a packaging result
pub fn add_package_context<T>(
    result: Result<T, PackageError>,
    source: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_package_error(e, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_missing_descriptor() {
        let err = PackageError::MissingDescriptor {
            directory: PathBuf::from("/skills/demo"),
            descriptor: "SKILL.md".to_string(),
        };
        let msg = format!("{:?}", convert_package_error(err, Path::new("demo")));
        assert!(msg.contains("SKILL.md not found in /skills/demo"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_validation_failed() {
        let err = PackageError::ValidationFailed {
            message: "No YAML frontmatter found".to_string(),
        };
        let msg = format!("{:?}", convert_package_error(err, Path::new("demo")));
        assert!(msg.contains("Validation failed"));
        assert!(msg.contains("No YAML frontmatter found"));
    }

    #[test]
    fn test_convert_archive_write() {
        let err = PackageError::ArchiveWrite {
            path: PathBuf::from("/ro/demo.skill"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let msg = format!("{:?}", convert_package_error(err, Path::new("demo")));
        assert!(msg.contains("/ro/demo.skill"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_add_package_context_passes_ok_through() {
        let result: Result<u32, PackageError> = Ok(7);
        assert_eq!(add_package_context(result, Path::new("demo")).ok(), Some(7));
    }
}

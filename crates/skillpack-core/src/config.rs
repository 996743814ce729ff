//! Configuration for packaging operations.

/// Default name of the required descriptor file.
pub const DESCRIPTOR_FILE: &str = "SKILL.md";

/// Default name of the optional exclusion rules file.
pub const IGNORE_FILE: &str = ".skillignore";

/// Default extension of produced archives.
pub const ARCHIVE_EXTENSION: &str = "skill";

/// Configuration for packaging a skill directory.
///
/// # Examples
///
/// ```
/// use skillpack_core::PackageConfig;
///
/// let config = PackageConfig::default().with_compression_level(Some(9));
/// assert_eq!(config.descriptor_file, "SKILL.md");
/// assert_eq!(config.compression_level, Some(9));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    /// File that must exist directly inside the source directory.
    ///
    /// Default: `SKILL.md`.
    pub descriptor_file: String,

    /// Rules file holding exclusion patterns, read from the source root.
    ///
    /// Default: `.skillignore`.
    pub ignore_file: String,

    /// Extension appended to the source directory name to form the
    /// archive file name.
    ///
    /// Default: `skill`.
    pub archive_extension: String,

    /// Deflate level (1-9), `Some(0)` stores entries uncompressed.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            descriptor_file: DESCRIPTOR_FILE.to_string(),
            ignore_file: IGNORE_FILE.to_string(),
            archive_extension: ARCHIVE_EXTENSION.to_string(),
            compression_level: Some(6),
        }
    }
}

impl PackageConfig {
    /// Creates a new `PackageConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the descriptor file name.
    #[must_use]
    pub fn with_descriptor_file(mut self, name: impl Into<String>) -> Self {
        self.descriptor_file = name.into();
        self
    }

    /// Sets the rules file name.
    #[must_use]
    pub fn with_ignore_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = name.into();
        self
    }

    /// Sets the archive extension.
    #[must_use]
    pub fn with_archive_extension(mut self, extension: impl Into<String>) -> Self {
        self.archive_extension = extension.into();
        self
    }

    /// Sets the compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: Option<u8>) -> Self {
        self.compression_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PackageConfig::default();
        assert_eq!(config.descriptor_file, "SKILL.md");
        assert_eq!(config.ignore_file, ".skillignore");
        assert_eq!(config.archive_extension, "skill");
        assert_eq!(config.compression_level, Some(6));
    }

    #[test]
    fn test_builder_chain() {
        let config = PackageConfig::new()
            .with_descriptor_file("PLUGIN.md")
            .with_ignore_file(".pluginignore")
            .with_archive_extension("zip")
            .with_compression_level(None);

        assert_eq!(config.descriptor_file, "PLUGIN.md");
        assert_eq!(config.ignore_file, ".pluginignore");
        assert_eq!(config.archive_extension, "zip");
        assert_eq!(config.compression_level, None);
    }
}

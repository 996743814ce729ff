//! Loading of exclusion rules from the source directory.

use crate::matcher::ExclusionPattern;
use std::fs;
use std::io;
use std::path::Path;

/// Parses rules file content into patterns.
///
/// Each line is trimmed. Blank lines and lines starting with `#` are
/// skipped; everything else becomes one pattern, in file order.
///
/// # Examples
///
/// ```
/// use skillpack_core::ignore::parse_patterns;
///
/// let patterns = parse_patterns("# build output\nbuild/\n\n  *.tmp  \n");
/// let raw: Vec<_> = patterns.iter().map(|p| p.as_str()).collect();
/// assert_eq!(raw, ["build/", "*.tmp"]);
/// ```
#[must_use]
pub fn parse_patterns(content: &str) -> Vec<ExclusionPattern> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ExclusionPattern::new)
        .collect()
}

/// Loads patterns from `file_name` inside `directory`.
///
/// A missing or unreadable rules file yields no patterns; packaging then
/// proceeds unfiltered.
pub fn load_patterns(directory: &Path, file_name: &str) -> Vec<ExclusionPattern> {
    let path = directory.join(file_name);
    match fs::read_to_string(&path) {
        Ok(content) => {
            let patterns = parse_patterns(&content);
            tracing::debug!(
                path = %path.display(),
                count = patterns.len(),
                "loaded exclusion patterns"
            );
            patterns
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable rules file");
            Vec::new()
        }
    }
}

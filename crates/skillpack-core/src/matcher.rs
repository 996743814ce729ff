//! Exclusion pattern matching against paths relative to the packaging root.
//!
//! A pattern excludes a file when any of these tiers match, checked in order:
//!
//! 1. Directory anchor: a pattern ending in `/` excludes everything below a
//!    root-relative directory of that name (`dist/` excludes `dist/app.js`).
//! 2. Whole-path glob: the glob is applied to the full relative path. `*`
//!    spans `/`, so `*.log` matches `logs/a/b.log`.
//! 3. Basename glob: the glob is applied to the final path component.
//! 4. Segment window: the pattern's `k` segments are compared against every
//!    run of `k` consecutive path segments, so `build/output` matches
//!    `src/build/output/file.txt` and `node_modules` matches
//!    `web/node_modules/pkg/index.js`.
//!
//! Patterns never re-include files. Order only decides which pattern is
//! reported as the match, not whether a file is excluded.

use glob::MatchOptions;
use glob::Pattern;
use std::fmt;
use std::path::Component;
use std::path::Path;

/// Options shared by every match tier.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Compiled form of a glob. Patterns the glob engine rejects (an unclosed
/// `[`, a `**` glued to other characters) compare literally instead.
#[derive(Debug, Clone)]
enum Glob {
    Pattern(Pattern),
    Literal(String),
}

impl Glob {
    fn compile(raw: &str) -> Self {
        Pattern::new(raw).map_or_else(|_| Self::Literal(raw.to_string()), Self::Pattern)
    }

    fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Pattern(pattern) => pattern.matches_with(candidate, MATCH_OPTIONS),
            Self::Literal(literal) => literal == candidate,
        }
    }
}

/// A single exclusion rule.
///
/// # Examples
///
/// ```
/// use skillpack_core::ExclusionPattern;
///
/// let pattern = ExclusionPattern::new("build/");
/// assert!(pattern.is_directory_anchor());
/// assert!(pattern.matches("build/out.bin"));
/// assert!(!pattern.matches("notes.md"));
///
/// let pattern = ExclusionPattern::new("*.pyc");
/// assert!(pattern.matches("scripts/__pycache__/run.pyc"));
/// ```
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    raw: String,
    glob: Glob,
    segments: usize,
}

impl ExclusionPattern {
    /// Compiles a pattern.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let glob = Glob::compile(&raw);
        let segments = raw.split('/').count();
        Self {
            raw,
            glob,
            segments,
        }
    }

    /// Returns the pattern as written in the rules file.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the pattern names a directory (ends with `/`).
    #[must_use]
    pub fn is_directory_anchor(&self) -> bool {
        self.raw.ends_with('/')
    }

    /// Returns `true` if the pattern matches a `/`-joined relative path.
    #[must_use]
    pub fn matches(&self, rel_path: &str) -> bool {
        self.matches_directory_anchor(rel_path)
            || self.glob.matches(rel_path)
            || self.glob.matches(basename(rel_path))
            || self.matches_segment_window(rel_path)
    }

    fn matches_directory_anchor(&self, rel_path: &str) -> bool {
        let Some(directory) = self.raw.strip_suffix('/') else {
            return false;
        };
        rel_path.starts_with(&self.raw) || rel_path == directory
    }

    fn matches_segment_window(&self, rel_path: &str) -> bool {
        let parts: Vec<&str> = rel_path.split('/').collect();
        if parts.len() < self.segments {
            return false;
        }
        parts
            .windows(self.segments)
            .any(|window| self.glob.matches(&window.join("/")))
    }
}

impl fmt::Display for ExclusionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for ExclusionPattern {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ExclusionPattern {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

fn basename(rel_path: &str) -> &str {
    rel_path.rsplit_once('/').map_or(rel_path, |(_, name)| name)
}

/// Expresses `path` relative to `root` as `/`-joined components.
///
/// Returns `None` if `path` is not under `root`.
///
/// # Examples
///
/// ```
/// use skillpack_core::matcher::relative_path;
/// use std::path::Path;
///
/// let rel = relative_path(Path::new("/skills/demo/scripts/run.py"), Path::new("/skills/demo"));
/// assert_eq!(rel.as_deref(), Some("scripts/run.py"));
///
/// assert_eq!(relative_path(Path::new("/etc/passwd"), Path::new("/skills/demo")), None);
/// ```
#[must_use]
pub fn relative_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Returns the first pattern that excludes `path`, if any.
#[must_use]
pub fn matching_pattern<'a>(
    path: &Path,
    root: &Path,
    patterns: &'a [ExclusionPattern],
) -> Option<&'a ExclusionPattern> {
    if patterns.is_empty() {
        return None;
    }
    let rel_path = relative_path(path, root)?;
    patterns.iter().find(|pattern| pattern.matches(&rel_path))
}

/// Decides whether `path` is excluded from the archive rooted at `root`.
///
/// Files outside `root` are never excluded.
///
/// # Examples
///
/// ```
/// use skillpack_core::ExclusionPattern;
/// use skillpack_core::matcher::is_excluded;
/// use std::path::Path;
///
/// let patterns = vec![ExclusionPattern::new("build/"), ExclusionPattern::new("*.tmp")];
/// let root = Path::new("/skills/demo");
///
/// assert!(is_excluded(Path::new("/skills/demo/build/out.bin"), root, &patterns));
/// assert!(is_excluded(Path::new("/skills/demo/cache/x.tmp"), root, &patterns));
/// assert!(!is_excluded(Path::new("/skills/demo/SKILL.md"), root, &patterns));
/// ```
#[must_use]
pub fn is_excluded(path: &Path, root: &Path, patterns: &[ExclusionPattern]) -> bool {
    matching_pattern(path, root, patterns).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(raw: &[&str]) -> Vec<ExclusionPattern> {
        raw.iter().copied().map(ExclusionPattern::new).collect()
    }

    #[test]
    fn test_directory_anchor_matches_contents() {
        let pattern = ExclusionPattern::new("build/");
        assert!(pattern.matches("build/out.bin"));
        assert!(pattern.matches("build/nested/deep/file.txt"));
        assert!(!pattern.matches("builder/out.bin"));
    }

    #[test]
    fn test_directory_anchor_is_root_relative() {
        let pattern = ExclusionPattern::new("build/");
        assert!(!pattern.matches("src/build/out.bin"));
    }

    #[test]
    fn test_directory_anchor_with_nested_prefix() {
        let pattern = ExclusionPattern::new("assets/raw/");
        assert!(pattern.matches("assets/raw/img.psd"));
        assert!(!pattern.matches("assets/final/img.png"));
    }

    #[test]
    fn test_whole_path_star_spans_separators() {
        let pattern = ExclusionPattern::new("docs/*.md");
        assert!(pattern.matches("docs/guide.md"));
        assert!(pattern.matches("docs/sub/guide.md"));
        assert!(!pattern.matches("docs/guide.txt"));
    }

    #[test]
    fn test_basename_match_at_any_depth() {
        let pattern = ExclusionPattern::new("*.pyc");
        assert!(pattern.matches("run.pyc"));
        assert!(pattern.matches("scripts/__pycache__/run.pyc"));
        assert!(!pattern.matches("scripts/run.py"));
    }

    #[test]
    fn test_question_mark_matches_single_character() {
        let pattern = ExclusionPattern::new("?.txt");
        assert!(pattern.matches("a.txt"));
        assert!(pattern.matches("dir/b.txt"));
        assert!(!pattern.matches("ab.txt"));
    }

    #[test]
    fn test_segment_window_matches_unanchored_path() {
        let pattern = ExclusionPattern::new("build/output");
        assert!(pattern.matches("src/build/output/file.txt"));
        assert!(pattern.matches("build/output"));
        assert!(!pattern.matches("src/build/other/file.txt"));
    }

    #[test]
    fn test_single_segment_matches_directory_at_any_depth() {
        let pattern = ExclusionPattern::new("node_modules");
        assert!(pattern.matches("node_modules/pkg/index.js"));
        assert!(pattern.matches("web/node_modules/pkg/index.js"));
        assert!(!pattern.matches("web/modules/index.js"));
    }

    #[test]
    fn test_segment_window_longer_than_path() {
        let pattern = ExclusionPattern::new("a/b/c");
        assert!(!pattern.matches("a/b"));
    }

    #[test]
    fn test_invalid_glob_compares_literally() {
        let pattern = ExclusionPattern::new("[draft");
        assert!(pattern.matches("[draft"));
        assert!(pattern.matches("notes/[draft"));
        assert!(!pattern.matches("draft"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let pattern = ExclusionPattern::new("*.MD");
        assert!(!pattern.matches("notes.md"));
    }

    #[test]
    fn test_relative_path_joins_with_forward_slash() {
        let rel = relative_path(Path::new("/root/skill/a/b/c.txt"), Path::new("/root/skill"));
        assert_eq!(rel.as_deref(), Some("a/b/c.txt"));
    }

    #[test]
    fn test_relative_path_of_root_is_empty() {
        let rel = relative_path(Path::new("/root/skill"), Path::new("/root/skill"));
        assert_eq!(rel.as_deref(), Some(""));
    }

    #[test]
    fn test_is_excluded_outside_root_is_false() {
        let rules = patterns(&["*"]);
        assert!(!is_excluded(
            Path::new("/elsewhere/file.txt"),
            Path::new("/root/skill"),
            &rules
        ));
    }

    #[test]
    fn test_is_excluded_without_patterns() {
        assert!(!is_excluded(
            Path::new("/root/skill/build/out.bin"),
            Path::new("/root/skill"),
            &[]
        ));
    }

    #[test]
    fn test_matching_pattern_reports_first_match() {
        let rules = patterns(&["*.md", "notes.md"]);
        let hit = matching_pattern(
            Path::new("/root/skill/notes.md"),
            Path::new("/root/skill"),
            &rules,
        );
        assert_eq!(hit.map(ExclusionPattern::as_str), Some("*.md"));
    }

    #[test]
    fn test_display_round_trips_raw_text() {
        assert_eq!(ExclusionPattern::new("dist/").to_string(), "dist/");
    }
}

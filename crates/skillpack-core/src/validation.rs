//! Structural validation of a skill directory before packaging.
//!
//! Packaging consults a [`Validator`] after the descriptor file has been
//! found. A rejected directory aborts packaging before the archive is opened.

use crate::config::DESCRIPTOR_FILE;
use serde_yaml::Mapping;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Frontmatter keys a descriptor may declare.
const ALLOWED_KEYS: [&str; 5] = ["allowed-tools", "description", "license", "metadata", "name"];

const MAX_NAME_LEN: usize = 64;
const MAX_DESCRIPTION_LEN: usize = 1024;

/// Result of validating a source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether packaging may proceed.
    pub valid: bool,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationOutcome {
    /// Creates a passing outcome.
    #[must_use]
    pub fn valid(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
        }
    }

    /// Creates a failing outcome.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Checks that a directory is fit for packaging.
///
/// Closures of the right shape are validators too:
///
/// ```
/// use skillpack_core::validation::ValidationOutcome;
/// use skillpack_core::validation::Validator;
/// use std::path::Path;
///
/// let accept_all = |_: &Path| ValidationOutcome::valid("ok");
/// assert!(accept_all.validate(Path::new(".")).valid);
/// ```
pub trait Validator {
    /// Validates the source directory.
    fn validate(&self, directory: &Path) -> ValidationOutcome;
}

impl<F> Validator for F
where
    F: Fn(&Path) -> ValidationOutcome,
{
    fn validate(&self, directory: &Path) -> ValidationOutcome {
        self(directory)
    }
}

/// Validates the YAML frontmatter of a skill descriptor.
///
/// The descriptor must open with a `---` fenced YAML mapping that declares
/// a hyphen-case `name` and a `description`, and nothing beyond the allowed
/// keys.
///
/// # Examples
///
/// ```no_run
/// use skillpack_core::validation::SkillValidator;
/// use skillpack_core::validation::Validator;
/// use std::path::Path;
///
/// let outcome = SkillValidator::default().validate(Path::new("skills/my-skill"));
/// println!("{}", outcome.message);
/// ```
#[derive(Debug, Clone)]
pub struct SkillValidator {
    descriptor_file: String,
}

impl Default for SkillValidator {
    fn default() -> Self {
        Self::new(DESCRIPTOR_FILE)
    }
}

impl SkillValidator {
    /// Creates a validator reading the given descriptor file name.
    #[must_use]
    pub fn new(descriptor_file: impl Into<String>) -> Self {
        Self {
            descriptor_file: descriptor_file.into(),
        }
    }

    fn check(&self, directory: &Path) -> Result<(), String> {
        let path = directory.join(&self.descriptor_file);
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {e}", self.descriptor_file))?;

        let frontmatter = extract_frontmatter(&content).ok_or_else(|| {
            if content.starts_with("---") {
                "Invalid frontmatter format".to_string()
            } else {
                "No YAML frontmatter found".to_string()
            }
        })?;

        let value: Value = serde_yaml::from_str(frontmatter)
            .map_err(|e| format!("Invalid YAML in frontmatter: {e}"))?;
        let Value::Mapping(mapping) = value else {
            return Err("Frontmatter must be a YAML dictionary".to_string());
        };

        self.check_keys(&mapping)?;
        check_name(&mapping)?;
        check_description(&mapping)
    }

    fn check_keys(&self, mapping: &Mapping) -> Result<(), String> {
        let mut unexpected: Vec<String> = mapping
            .keys()
            .map(|key| key.as_str().map_or_else(|| format!("{key:?}"), str::to_string))
            .filter(|key| !ALLOWED_KEYS.contains(&key.as_str()))
            .collect();
        if unexpected.is_empty() {
            return Ok(());
        }
        unexpected.sort();
        Err(format!(
            "Unexpected key(s) in {} frontmatter: {}. Allowed properties are: {}",
            self.descriptor_file,
            unexpected.join(", "),
            ALLOWED_KEYS.join(", ")
        ))
    }
}

impl Validator for SkillValidator {
    fn validate(&self, directory: &Path) -> ValidationOutcome {
        match self.check(directory) {
            Ok(()) => ValidationOutcome::valid("Skill is valid!"),
            Err(message) => ValidationOutcome::invalid(message),
        }
    }
}

/// Returns the text between the opening `---` line and the next `---` line.
fn extract_frontmatter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

fn string_field<'a>(mapping: &'a Mapping, key: &str) -> Result<&'a str, String> {
    match mapping.get(key) {
        None => Err(format!("Missing '{key}' in frontmatter")),
        Some(Value::String(value)) => Ok(value.trim()),
        Some(other) => Err(format!(
            "{key} must be a string, got {}",
            type_name(other)
        )),
    }
}

fn check_name(mapping: &Mapping) -> Result<(), String> {
    let name = string_field(mapping, "name")?;
    if name.is_empty() {
        return Err("Name must not be empty".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(format!(
            "Name '{name}' should be hyphen-case (lowercase letters, digits, and hyphens only)"
        ));
    }
    if name.starts_with('-') || name.ends_with('-') || name.contains("--") {
        return Err(format!(
            "Name '{name}' cannot start/end with hyphen or contain consecutive hyphens"
        ));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(format!(
            "Name is too long ({len} characters). Maximum is {MAX_NAME_LEN} characters."
        ));
    }
    Ok(())
}

fn check_description(mapping: &Mapping) -> Result<(), String> {
    let description = string_field(mapping, "description")?;
    if description.contains(['<', '>']) {
        return Err("Description cannot contain angle brackets (< or >)".to_string());
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "Description is too long ({len} characters). Maximum is {MAX_DESCRIPTION_LEN} characters."
        ));
    }
    Ok(())
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

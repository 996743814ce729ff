//! Integration tests for skillpack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::ZipArchive;

const DESCRIPTOR: &str = "---\nname: my-skill\ndescription: Packs things\n---\n# My Skill\n";

fn skillpack_cmd() -> Command {
    cargo_bin_cmd!("skillpack")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Builds the `my-skill` fixture: a descriptor, one note and an excluded
/// build directory.
fn scenario_skill(temp: &TempDir) -> PathBuf {
    let skill = temp.path().join("my-skill");
    write(&skill, "SKILL.md", DESCRIPTOR);
    write(&skill, "notes.md", "notes");
    write(&skill, "build/out.bin", "binary");
    write(&skill, ".skillignore", "# build output\nbuild/\n");
    skill
}

fn archive_names(path: &Path) -> BTreeSet<String> {
    let zip = ZipArchive::new(File::open(path).expect("archive exists")).unwrap();
    zip.file_names().map(str::to_string).collect()
}

#[test]
fn test_version_flag() {
    skillpack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skillpack"));
}

#[test]
fn test_help_flag() {
    skillpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_package_help() {
    skillpack_cmd()
        .args(["package", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SOURCE_DIR"));
}

#[test]
fn test_package_scenario() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let skill = scenario_skill(&temp);
    let out = temp.path().join("dist");

    skillpack_cmd()
        .arg("package")
        .arg(&skill)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Packaging skill:"))
        .stdout(predicate::str::contains("Skill is valid!"))
        .stdout(predicate::str::contains(
            "Using .skillignore with 1 exclusion patterns",
        ))
        .stdout(predicate::str::contains("Added: my-skill/SKILL.md"))
        .stdout(predicate::str::contains("Added: my-skill/notes.md"))
        .stdout(predicate::str::contains("Excluded: 1 files (per .skillignore)"))
        .stdout(predicate::str::contains("Successfully packaged skill to:"));

    let names = archive_names(&out.join("my-skill.skill"));
    assert_eq!(
        names,
        BTreeSet::from(["my-skill/SKILL.md".to_string(), "my-skill/notes.md".to_string()])
    );
}

#[test]
fn test_package_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let skill = scenario_skill(&temp);

    let output = skillpack_cmd()
        .arg("--json")
        .arg("package")
        .arg(&skill)
        .arg(temp.path())
        .output()
        .expect("command runs");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "package");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_added"], 2);
    assert_eq!(json["data"]["files_excluded"], 1);
    assert_eq!(json["data"]["patterns_used"], 1);
}

#[test]
fn test_package_defaults_to_current_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let skill = scenario_skill(&temp);
    let cwd = temp.path().join("work");
    fs::create_dir_all(&cwd).unwrap();

    skillpack_cmd()
        .current_dir(&cwd)
        .arg("package")
        .arg(&skill)
        .assert()
        .success();

    assert!(cwd.join("my-skill.skill").is_file());
}

#[test]
fn test_package_quiet_prints_nothing() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let skill = scenario_skill(&temp);

    skillpack_cmd()
        .arg("-q")
        .arg("package")
        .arg(&skill)
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("my-skill.skill").is_file());
}

#[test]
fn test_package_with_compression_level() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let skill = scenario_skill(&temp);

    skillpack_cmd()
        .args(["package", "-l", "9"])
        .arg(&skill)
        .arg(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("my-skill.skill").is_file());
}

#[test]
fn test_package_missing_descriptor_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let skill = temp.path().join("my-skill");
    write(&skill, "notes.md", "notes");
    let out = temp.path().join("dist");

    skillpack_cmd()
        .arg("package")
        .arg(&skill)
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SKILL.md not found"));

    assert!(!out.join("my-skill.skill").exists());
}

#[test]
fn test_package_invalid_descriptor_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let skill = temp.path().join("my-skill");
    write(&skill, "SKILL.md", "---\nname: Bad_Name\ndescription: x\n---\n");

    skillpack_cmd()
        .arg("package")
        .arg(&skill)
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Validation failed"))
        .stderr(predicate::str::contains("hyphen-case"));

    assert!(!temp.path().join("my-skill.skill").exists());
}

#[test]
fn test_package_nonexistent_path_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");

    skillpack_cmd()
        .arg("package")
        .arg(temp.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Skill folder not found"));
}

#[test]
fn test_package_file_path_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let file = temp.path().join("SKILL.md");
    fs::write(&file, DESCRIPTOR).unwrap();

    skillpack_cmd()
        .arg("package")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Path is not a directory"));
}

#[test]
fn test_package_error_in_json_mode() {
    let temp = TempDir::new().expect("failed to create temp dir");

    let output = skillpack_cmd()
        .arg("--json")
        .arg("package")
        .arg(temp.path().join("missing"))
        .output()
        .expect("command runs");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "error");
    assert!(json.get("data").is_none());
}

#[test]
fn test_package_without_source_fails() {
    skillpack_cmd()
        .arg("package")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SOURCE_DIR"));
}

#[test]
fn test_no_subcommand_fails() {
    skillpack_cmd().assert().code(1);
}

#[test]
fn test_completion_bash() {
    skillpack_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skillpack"));
}

#[test]
fn test_package_output_dir_is_a_file_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let skill = scenario_skill(&temp);
    let blocker = temp.path().join("dist");
    fs::write(&blocker, "not a directory").unwrap();

    skillpack_cmd()
        .arg("package")
        .arg(&skill)
        .arg(&blocker)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error creating archive"));

    assert!(blocker.is_file());
    assert!(!temp.path().join("my-skill.skill").exists());
    assert!(!blocker.join("my-skill.skill").exists());
}

#[test]
fn test_package_into_source_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let skill = scenario_skill(&temp);

    skillpack_cmd()
        .current_dir(&skill)
        .args(["package", "."])
        .assert()
        .success();

    let names = archive_names(&skill.join("my-skill.skill"));
    assert_eq!(
        names,
        BTreeSet::from(["my-skill/SKILL.md".to_string(), "my-skill/notes.md".to_string()])
    );
}

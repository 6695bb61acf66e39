//! End-to-end tests for the `lst` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn lst() -> Command {
    let mut cmd = Command::cargo_bin("lst").unwrap();
    cmd.arg("--no-color");
    cmd
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("main.tf"),
        "# network\nvariable \"region\" {\n  default = \"eu-west-1\"\n}\n\nregion = var.region\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("Dockerfile"),
        "FROM alpine AS base\nRUN apk add --no-cache curl\nCMD [\"curl\", \"--version\"]\n",
    )
    .unwrap();
    fs::write(dir.path().join("README.md"), "# not parsed\n").unwrap();
    dir
}

#[test]
fn test_check_passes_on_well_formed_files() {
    let dir = workspace();
    lst()
        .arg("check")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked 2 files, 0 failed"));
}

#[test]
fn test_check_fails_on_malformed_files() {
    let dir = workspace();
    fs::write(dir.path().join("broken.tf"), "a = = 1\n").unwrap();
    lst()
        .arg("check")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Checked 3 files, 1 failed"))
        .stderr(predicate::str::contains("broken.tf"));
}

#[test]
fn test_check_include_limits_walked_files() {
    let dir = workspace();
    lst()
        .args(["check", "--include", "*.tf"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked 1 files, 0 failed"));
}

#[test]
fn test_check_parses_ambiguous_names_once() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("Dockerfile.tf");
    fs::write(&file, "image = \"alpine\"\n").unwrap();
    lst()
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked 1 files, 0 failed"));

    let output = lst().args(["stats", "--json"]).arg(&file).output().unwrap();
    assert!(output.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["files"], 1);
    assert_eq!(stats["failed_files"], 0);
}

#[test]
fn test_print_reproduces_the_file() {
    let dir = workspace();
    let original = fs::read_to_string(dir.path().join("Dockerfile")).unwrap();
    lst()
        .arg("print")
        .arg(dir.path().join("Dockerfile"))
        .assert()
        .success()
        .stdout(original);
}

#[test]
fn test_print_find_marks_hcl_identifiers() {
    let dir = workspace();
    lst()
        .args(["print", "--find", "region"])
        .arg(dir.path().join("main.tf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\n/*~~>*/region = var."));
}

#[test]
fn test_print_find_marks_dockerfile_instructions() {
    let dir = workspace();
    lst()
        .args(["print", "--find", "run"])
        .arg(dir.path().join("Dockerfile"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\n~~>RUN apk add"));
}

#[test]
fn test_print_rejects_unsupported_files() {
    let dir = workspace();
    lst()
        .arg("print")
        .arg(dir.path().join("README.md"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn test_stats_json_counts_nodes() {
    let dir = workspace();
    let output = lst()
        .args(["stats", "--json"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["files"], 2);
    assert_eq!(stats["failed_files"], 0);
    assert_eq!(stats["kinds"]["Block"], 1);
    assert_eq!(stats["kinds"]["From"], 1);
    assert_eq!(stats["kinds"]["ExecForm"], 1);
}

#[test]
fn test_missing_path_is_an_error() {
    lst()
        .args(["check", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path not found"));
}

//! Tests for error handling, suggestions and exit codes.

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_missing_input_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.txt");

    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.arg("validate")
        .arg(&missing)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template file not found"))
        .stderr(predicate::str::contains("stdin"));
}

#[test]
fn test_missing_config_file_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("quill.toml");

    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.arg("--config")
        .arg(&missing)
        .args(["config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_unknown_config_key_suggests_list() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["config", "get", "defaults.lang"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"))
        .stderr(predicate::str::contains("quill config list"));
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["-q", "-v", "validate"]).assert().code(2);
}

#[test]
fn test_exec_malformed_json() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.arg("exec")
        .write_stdin("{ not json")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"success\": false"))
        .stdout(predicate::str::contains("Malformed request"));
}

#[test]
fn test_exec_empty_content() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.arg("exec")
        .write_stdin(r#"{"operation": "validate", "content": "   "}"#)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Invalid request"));
}

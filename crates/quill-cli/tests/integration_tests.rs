//! Integration tests for quill-cli.

use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const CLEAN: &str = "ROLE: You are a code reviewer.\n\n\
                     CONTEXT: The code is a Rust crate.\n\n\
                     TASK: Review {{file_name}} for bugs.\n\n\
                     FORMAT: A bullet list.\n";

fn write_template(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

#[test]
fn test_help_flag() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("enhance"));
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_clean_template() {
    let temp = TempDir::new().unwrap();
    let file = write_template(&temp, "clean.txt", CLEAN);

    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["validate", &file, "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Template is valid"));
}

#[test]
fn test_validate_reports_violations_and_fails() {
    let temp = TempDir::new().unwrap();
    let file = write_template(&temp, "partial.txt", "TASK: Summarize {{doc}}.\n");

    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["validate", &file, "--output-format", "plain"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "[missing-section] Missing required ROLE section",
        ))
        .stdout(predicate::str::contains("2 error(s), 1 warning(s)"));
}

#[test]
fn test_validate_json_from_stdin() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    let assert = cmd
        .args(["validate", "-", "--output-format", "json"])
        .write_stdin("{{a}} and [b]")
        .assert()
        .code(2);

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["isValid"], false);
    let format_errors = value["violations"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|v| v["rule"] == "variable-format")
        .count();
    assert_eq!(format_errors, 1);
}

#[test]
fn test_warnings_pass_unless_configured() {
    let temp = TempDir::new().unwrap();
    let file = write_template(&temp, "no-format.txt", "ROLE: r\n\nCONTEXT: c\n\nTASK: t\n");

    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["validate", &file, "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[missing-format]"));

    let config = write_template(
        &temp,
        "quill.toml",
        "[validate]\nfail_on_warnings = true\n",
    );
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["--config", &config, "validate", &file])
        .assert()
        .code(2);
}

#[test]
fn test_analyze_json_includes_metadata() {
    let temp = TempDir::new().unwrap();
    let file = write_template(&temp, "clean.txt", CLEAN);

    let mut cmd = cargo::cargo_bin_cmd!("quill");
    let assert = cmd
        .args([
            "analyze",
            &file,
            "--type",
            "review",
            "--template-version",
            "2",
            "--output-format",
            "json",
        ])
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["score"], 100);
    assert_eq!(value["details"]["metadata"]["type"], "review");
    assert_eq!(value["details"]["metadata"]["version"], "2");
}

#[test]
fn test_analyze_plain_lists_issues() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["analyze", "--output-format", "plain"])
        .write_stdin("Summarize this.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 60/100"))
        .stdout(predicate::str::contains("Missing ROLE section"));
}

#[test]
fn test_enhance_stdin_to_stdout() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["enhance", "--output-format", "plain"])
        .write_stdin("Please summarize this document.")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ROLE: "))
        .stdout(predicate::str::contains(
            "CONTEXT: Please summarize this document.",
        ))
        .stdout(predicate::str::contains("FORMAT: "));
}

#[test]
fn test_enhance_writes_output_file() {
    let temp = TempDir::new().unwrap();
    let input = write_template(&temp, "in.txt", "role: tutor\n\nTASK: explain [topic]\n");
    let out = temp.path().join("out.txt");

    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["enhance", &input, "--output"])
        .arg(&out)
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("ROLE: tutor"));
    assert!(written.contains("CONTEXT: "));
    assert!(written.contains("TASK: explain {{topic}}"));
    assert!(written.contains("FORMAT: "));
}

#[test]
fn test_exec_success_envelope() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    let assert = cmd
        .arg("exec")
        .write_stdin(r#"{"operation": "analyze", "content": "TASK: x"}"#)
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["success"], true);
    assert_eq!(value["result"]["details"]["structure"]["hasTask"], true);
}

#[test]
fn test_exec_failure_envelope() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    let assert = cmd
        .arg("exec")
        .write_stdin(r#"{"operation": "summarize", "content": "TASK: x"}"#)
        .assert()
        .code(2);

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["success"], false);
    assert_eq!(value["errors"][0]["rule"], "schema");
    assert_eq!(value["errors"][0]["severity"], "error");
    assert_eq!(
        value["errors"][0]["message"],
        "Unknown operation 'summarize'"
    );
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quill"));
}

#[test]
fn test_config_get_reads_file_and_env() {
    let temp = TempDir::new().unwrap();
    let config = write_template(&temp, "quill.toml", "[output]\nformat = \"plain\"\n");

    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["--config", &config, "config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::diff("plain\n"));

    let mut cmd = cargo::cargo_bin_cmd!("quill");
    cmd.args(["--config", &config, "config", "get", "validate.fail_on_warnings"])
        .env("QUILL__VALIDATE__FAIL_ON_WARNINGS", "true")
        .assert()
        .success()
        .stdout(predicate::str::diff("true\n"));
}

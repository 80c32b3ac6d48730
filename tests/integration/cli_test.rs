//! CLI behavior tests.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn postnorm() -> Command {
    Command::cargo_bin("postnorm").unwrap()
}

#[test]
fn unknown_kind_fails_with_invalid_argument_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("items.json");
    fs::write(&input, "[]").unwrap();

    postnorm()
        .args(["run", "--kind", "user", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported content kind"));
}

#[test]
fn missing_input_file_fails_with_context() {
    postnorm()
        .args(["run", "--kind", "single-work", "--input", "/nonexistent/items.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input"));
}

#[test]
fn run_writes_one_json_line_per_record() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("items.json");
    let output = dir.path().join("records.jsonl");

    let items = json!([
        {
            "aweme_id": "7123",
            "desc": "lake day",
            "create_time": 1686830400,
            "video": {"play_addr": {"url_list": ["a", "b"]}}
        },
        {
            "aweme_id": "7124",
            "images": [{"url_list": ["img"]}]
        }
    ]);
    fs::write(&input, items.to_string()).unwrap();

    postnorm()
        .args(["run", "--kind", "single-work", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["id"], "7123");
    assert_eq!(first["type"], "video");
    assert_eq!(first["downloads"], "b");

    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["type"], "image-set");
    assert_eq!(second["downloads"], "img");
}

#[test]
fn timeline_window_flags_filter_the_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("items.json");
    let output = dir.path().join("records.jsonl");

    // 2023-06-15 noon UTC; the wide window below covers it in any timezone.
    let items = json!([
        {"aweme_id": "1", "create_time": 1686830400},
        {"aweme_id": "2"}
    ]);
    fs::write(&input, items.to_string()).unwrap();

    postnorm()
        .args([
            "run",
            "--kind",
            "user-timeline",
            "--nickname",
            "casey",
            "--post",
            "--earliest",
            "2023-06-01",
            "--latest",
            "2023-06-30",
            "--input",
        ])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    // The record without a usable timestamp is dropped, not fatal.
    assert_eq!(written.lines().count(), 1);
    assert!(written.contains("\"id\":\"1\""));
}

#[test]
fn malformed_input_json_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("items.json");
    fs::write(&input, "{not json").unwrap();

    postnorm()
        .args(["run", "--kind", "single-work", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn config_path_prints_a_toml_location() {
    postnorm()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn completions_generate_for_bash() {
    postnorm()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("postnorm"));
}

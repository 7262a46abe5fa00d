#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn patrons_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin("patrons"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_json(args: &[&str]) -> Value {
    let output = patrons_cmd().args(args).assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_default_page() {
    let json = run_json(&["--count", "25"]);

    assert_eq!(json["TotalCount"], 25);
    assert_eq!(json["CurrentCount"], 10);
    assert_eq!(json["PageSize"], 10);
    assert_eq!(json["CurrentPage"], 1);
    assert_eq!(json["TotalPages"], 3);
    assert_eq!(json["HasNextPage"], true);
    assert_eq!(json["HasPreviousPage"], false);
}

#[test]
fn test_inline_criteria() {
    let json = run_json(&["--count", "25", "--criteria", r#"{"formid": 3}"#]);

    assert_eq!(json["TotalCount"], 1);
    assert_eq!(json["Data"][0]["FormID"], 3);
}

#[test]
fn test_criteria_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("criteria.json");
    fs::write(&path, r#"{"FormStatus": [0, 1, 2, 4], "Nickname": "x"}"#).unwrap();

    let json = run_json(&["--count", "40", "--criteria-file", path.to_str().unwrap()]);
    assert_eq!(json["TotalCount"], 40);
}

#[test]
fn test_criteria_from_stdin() {
    let output = patrons_cmd()
        .args(["--count", "12", "--criteria-file", "-"])
        .write_stdin(r#"{"FormID": 12}"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["Data"][0]["FormID"], 12);
}

#[test]
fn test_same_seed_is_reproducible() {
    let first = run_json(&["--seed", "9", "--page", "2"]);
    let second = run_json(&["--seed", "9", "--page", "2"]);
    assert_eq!(first, second);
}

#[test]
fn test_past_last_page_is_empty() {
    let json = run_json(&["--count", "5", "--page", "3", "--size", "5"]);

    assert_eq!(json["Data"], Value::Array(vec![]));
    assert_eq!(json["TotalCount"], 5);
    assert_eq!(json["HasPreviousPage"], true);
}

#[test]
fn test_pretty_output() {
    patrons_cmd()
        .args(["--count", "1", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"TotalCount\": 1"));
}

#[test]
fn test_invalid_page_fails() {
    patrons_cmd()
        .args(["--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page number must be at least 1"));
}

#[test]
fn test_page_size_above_maximum_fails() {
    patrons_cmd()
        .args(["--size", "50", "--max-size", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum of 20"));
}

#[test]
fn test_invalid_criteria_fails() {
    patrons_cmd()
        .args(["--criteria", "{ nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid criteria JSON"));

    patrons_cmd()
        .args(["--criteria", "[1, 2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object, got array"));
}

#[test]
fn test_verbose_logs_skipped_criteria() {
    patrons_cmd()
        .args(["-v", "--criteria", r#"{"Nickname": "x"}"#])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping search criterion"));
}

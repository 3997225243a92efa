//! Integration tests for the `leave` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the check, book,
//! decide, merge, and window subcommands through the actual binary, including
//! JSON output on stdout, file updates, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

/// Helper: path to the bookings.json fixture.
fn bookings_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bookings.json")
}

/// Helper: path to the config.json fixture.
fn config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config.json")
}

/// Helper: copy the bookings fixture into a temp dir so it can be modified.
fn scratch_bookings() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bookings.json");
    std::fs::copy(bookings_path(), &path).expect("copy fixture");
    (dir, path)
}

fn leave() -> Command {
    Command::cargo_bin("leave").unwrap()
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout must be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_free_range_is_allowed() {
    let output = leave()
        .args(["check", "-b", bookings_path()])
        .args(["--start", "2024-05-01", "--end", "2024-05-03"])
        .args(["--today", "2024-01-01"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!({"decision": "allowed"}));
}

#[test]
fn check_conflict_prints_suggestions() {
    let output = leave()
        .args(["check", "-b", bookings_path()])
        .args(["--start", "2024-02-10", "--end", "2024-02-15"])
        .args(["--today", "2024-01-01"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["decision"], "rejected");
    assert_eq!(value["requested_days"], 6);
    assert_eq!(
        value["suggestions"],
        json!([
            {"start": "2024-01-11", "end": "2024-01-16"},
            {"start": "2024-02-18", "end": "2024-02-23"},
            {"start": "2024-03-11", "end": "2024-03-16"}
        ])
    );
}

#[test]
fn check_ignores_rejected_bookings() {
    let output = leave()
        .args(["check", "-b", bookings_path()])
        .args(["--start", "2024-04-02", "--end", "2024-04-04"])
        .args(["--today", "2024-01-01"])
        .output()
        .unwrap();

    assert_eq!(stdout_json(&output)["decision"], "allowed");
}

#[test]
fn config_file_and_flags_limit_suggestions() {
    let output = leave()
        .args(["check", "-b", bookings_path(), "--config", config_path()])
        .args(["--start", "2024-02-10", "--end", "2024-02-15"])
        .args(["--today", "2024-01-01"])
        .output()
        .unwrap();
    let suggestions = stdout_json(&output)["suggestions"].clone();
    assert_eq!(suggestions.as_array().unwrap().len(), 1);

    // The flag wins over the config file.
    let output = leave()
        .args(["check", "-b", bookings_path(), "--config", config_path()])
        .args(["--max-suggestions", "2"])
        .args(["--start", "2024-02-10", "--end", "2024-02-15"])
        .args(["--today", "2024-01-01"])
        .output()
        .unwrap();
    let suggestions = stdout_json(&output)["suggestions"].clone();
    assert_eq!(suggestions.as_array().unwrap().len(), 2);
}

#[test]
fn single_day_request_fails_validation() {
    leave()
        .args(["check", "-b", bookings_path()])
        .args(["--start", "2024-05-01", "--end", "2024-05-01"])
        .args(["--today", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one day long"));
}

#[test]
fn missing_end_date_fails_validation() {
    leave()
        .args(["check", "-b", bookings_path()])
        .args(["--start", "2024-05-01", "--today", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Start date and end date are required"));
}

#[test]
fn past_start_fails_validation() {
    leave()
        .args(["check", "-b", bookings_path()])
        .args(["--start", "2023-12-20", "--end", "2023-12-22"])
        .args(["--today", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in the past"));
}

#[test]
fn malformed_bookings_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    leave()
        .args(["check", "-b", path.to_str().unwrap()])
        .args(["--start", "2024-05-01", "--end", "2024-05-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse bookings file"));
}

#[test]
fn invalid_date_argument_rejected_by_parser() {
    leave()
        .args(["check", "-b", bookings_path()])
        .args(["--start", "2024-13-01", "--end", "2024-05-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--start"));
}

// ─────────────────────────────────────────────────────────────────────────────
// book / decide
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn book_then_approve() {
    let (_dir, path) = scratch_bookings();
    let path = path.to_str().unwrap();

    let output = leave()
        .args(["book", "-b", path, "--note", "garden"])
        .args(["--start", "2024-05-01", "--end", "2024-05-03"])
        .args(["--today", "2024-01-01"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!({"booked": 5}));

    let stored: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let new_booking = &stored.as_array().unwrap()[4];
    assert_eq!(new_booking["status"], "pending");
    assert_eq!(new_booking["note"], "garden");

    leave()
        .args(["decide", "-b", path, "--id", "5", "--approve"])
        .args(["--comment", "enjoy", "--today", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"approved\""));

    let stored: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(stored[4]["status"], "approved");
    assert_eq!(stored[4]["comment"], "enjoy");
    assert_eq!(stored[4]["decided_on"], "2024-01-02");
}

#[test]
fn duplicate_ids_in_bookings_file_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dupes.json");
    std::fs::write(
        &path,
        r#"[
  {"id": 3, "start": "2024-02-12", "end": "2024-02-17", "status": "approved"},
  {"id": 3, "start": "2024-03-01", "end": "2024-03-05", "status": "pending"}
]"#,
    )
    .unwrap();

    leave()
        .args(["merge", "-b", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate booking id: 3"));
}

#[test]
fn book_conflict_leaves_file_untouched() {
    let (_dir, path) = scratch_bookings();
    let before = std::fs::read_to_string(&path).unwrap();

    let output = leave()
        .args(["book", "-b", path.to_str().unwrap()])
        .args(["--start", "2024-03-04", "--end", "2024-03-07"])
        .args(["--today", "2024-01-01"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["rejected"]["requested_days"], 4);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn book_into_missing_file_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.json");

    leave()
        .args(["book", "-b", path.to_str().unwrap()])
        .args(["--start", "2024-05-01", "--end", "2024-05-03"])
        .args(["--today", "2024-01-01"])
        .assert()
        .success();

    let stored: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored[0]["id"], 1);
    assert_eq!(stored[0]["start"], "2024-05-01");
}

#[test]
fn decide_already_decided_booking_fails() {
    let (_dir, path) = scratch_bookings();

    leave()
        .args(["decide", "-b", path.to_str().unwrap(), "--id", "1", "--reject"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only pending bookings can be decided"));
}

#[test]
fn decide_requires_a_verdict() {
    let (_dir, path) = scratch_bookings();

    leave()
        .args(["decide", "-b", path.to_str().unwrap(), "--id", "2"])
        .assert()
        .failure();
}

#[test]
fn rejecting_pending_booking_frees_its_days() {
    let (_dir, path) = scratch_bookings();
    let path = path.to_str().unwrap();

    leave()
        .args(["decide", "-b", path, "--id", "2", "--reject"])
        .assert()
        .success();

    let output = leave()
        .args(["merge", "-b", path])
        .output()
        .unwrap();
    assert_eq!(
        stdout_json(&output),
        json!([
            {"start": "2024-02-12", "end": "2024-02-17"},
            {"start": "2024-03-06", "end": "2024-03-10"}
        ])
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// merge / window
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn merge_joins_adjacent_bookings() {
    let output = leave().args(["merge", "-b", bookings_path()]).output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!([
            {"start": "2024-02-12", "end": "2024-02-17"},
            {"start": "2024-03-01", "end": "2024-03-10"}
        ])
    );
}

#[test]
fn window_uses_default_horizons() {
    let output = leave()
        .args(["window", "--start", "2024-02-10", "--end", "2024-02-15"])
        .output()
        .unwrap();

    assert_eq!(
        stdout_json(&output),
        json!({"start": "2024-01-11", "end": "2024-08-19"})
    );
}

#[test]
fn window_with_custom_horizons() {
    let output = leave()
        .args(["window", "--start", "2024-02-10", "--end", "2024-02-15"])
        .args(["--lookback", "10", "--lookforward", "0"])
        .output()
        .unwrap();

    assert_eq!(
        stdout_json(&output),
        json!({"start": "2024-01-31", "end": "2024-02-21"})
    );
}

#[test]
fn window_rejects_reversed_range() {
    leave()
        .args(["window", "--start", "2024-02-15", "--end", "2024-02-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("before start date"));
}

#[test]
fn no_subcommand_shows_usage() {
    leave()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

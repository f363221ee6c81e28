//! Integration tests for the `schedule-sync` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the status,
//! window, free-slots and conflicts subcommands through the actual binary,
//! including stdin input, config files and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the schedule.json fixture.
fn schedule_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/schedule.json")
}

/// Helper: path to the half_open.toml fixture.
fn half_open_config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/half_open.toml")
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("schedule-sync").unwrap();
    cmd.args(["-i", schedule_path()]);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// status
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn status_reports_busy_owner_with_event_title() {
    cli()
        .args(["status", "alice", "--at", "2025-10-22T09:05:00Z"])
        .assert()
        .success()
        .stdout("alice: busy (Standup)\n");
}

#[test]
fn status_naive_event_matches_aware_instant() {
    // Lunch is stored without an offset and read as UTC.
    cli()
        .args(["status", "alice", "--at", "2025-10-22T12:30:00+00:00"])
        .assert()
        .success()
        .stdout("alice: busy (Lunch)\n");
}

#[test]
fn status_skips_malformed_event() {
    // "Broken import" would cover 10:00 if its start parsed.
    cli()
        .args(["status", "alice", "--at", "2025-10-22T10:00:00Z"])
        .assert()
        .success()
        .stdout("alice: free\n");
}

#[test]
fn status_for_several_owners_in_order() {
    cli()
        .args(["status", "alice", "bob", "dave", "--at", "2025-10-22T09:05:00Z"])
        .assert()
        .success()
        .stdout("alice: busy (Standup)\nbob: free\ndave: free\n");
}

#[test]
fn missing_owner_can_be_reported_unknown() {
    cli()
        .args([
            "--missing-owner",
            "unknown",
            "status",
            "dave",
            "--at",
            "2025-10-22T09:05:00Z",
        ])
        .assert()
        .success()
        .stdout("dave: unknown\n");
}

#[test]
fn event_end_is_busy_by_default() {
    cli()
        .args(["status", "alice", "--at", "2025-10-22T09:15:00Z"])
        .assert()
        .success()
        .stdout("alice: busy (Standup)\n");
}

#[test]
fn half_open_policy_flag_frees_event_end() {
    cli()
        .args([
            "--policy",
            "half-open",
            "status",
            "alice",
            "--at",
            "2025-10-22T09:15:00Z",
        ])
        .assert()
        .success()
        .stdout("alice: free\n");
}

#[test]
fn config_file_sets_policies() {
    cli()
        .args([
            "--config",
            half_open_config_path(),
            "status",
            "alice",
            "dave",
            "--at",
            "2025-10-22T09:15:00Z",
        ])
        .assert()
        .success()
        .stdout("alice: free\ndave: unknown\n");
}

#[test]
fn status_json_output() {
    let output = cli()
        .args(["status", "alice", "bob", "--at", "2025-10-22T09:05:00Z", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["owner"], "alice");
    assert_eq!(rows[0]["status"], "busy");
    assert_eq!(rows[0]["event"]["id"], "standup");
    assert_eq!(rows[1]["status"], "free");
    assert!(rows[1]["event"].is_null());
}

#[test]
fn schedule_read_from_stdin() {
    let schedule = r#"{"erin":[{"id":"x","title":"Call","start":"2025-10-22T09:00:00","end":"2025-10-22T10:00:00"}]}"#;
    Command::cargo_bin("schedule-sync")
        .unwrap()
        .args(["status", "erin", "--at", "2025-10-22T09:30:00Z"])
        .write_stdin(schedule)
        .assert()
        .success()
        .stdout("erin: busy (Call)\n");
}

#[test]
fn status_requires_an_owner() {
    cli().arg("status").assert().failure();
}

#[test]
fn invalid_at_is_an_error() {
    cli()
        .args(["status", "alice", "--at", "bad-timestamp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --at timestamp"));
}

// ─────────────────────────────────────────────────────────────────────────────
// window
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn window_day_finds_any_event() {
    cli()
        .args(["window", "alice", "--day", "2025-10-22"])
        .assert()
        .success()
        .stdout("alice: busy (Standup)\n");
}

#[test]
fn window_day_without_events_is_free() {
    cli()
        .args(["window", "alice", "--day", "2025-10-23"])
        .assert()
        .success()
        .stdout("alice: free\n");
}

#[test]
fn window_day_uses_timezone() {
    // In Tokyo, 2025-10-23 runs from 2025-10-22T15:00Z, after all of alice's events.
    cli()
        .args(["--tz", "Asia/Tokyo", "window", "alice", "--day", "2025-10-23"])
        .assert()
        .success()
        .stdout("alice: free\n");
}

#[test]
fn window_explicit_range() {
    cli()
        .args([
            "window",
            "alice",
            "--start",
            "2025-10-22T09:10:00Z",
            "--end",
            "2025-10-22T11:00:00Z",
        ])
        .assert()
        .success()
        .stdout("alice: busy (Standup)\n");
}

#[test]
fn window_week_from_reference_instant() {
    cli()
        .args(["window", "carol", "--week", "--at", "2025-10-24T12:00:00Z"])
        .assert()
        .success()
        .stdout("carol: busy (Class)\n");
}

#[test]
fn week_at_end_of_calendar_fails_cleanly() {
    cli()
        .args(["window", "carol", "--week", "--at", "+262142-12-31T00:00:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn free_slots_help_states_its_bounds() {
    Command::cargo_bin("schedule-sync")
        .unwrap()
        .args(["free-slots", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("regardless of --policy"));
}

#[test]
fn inverted_window_is_an_error() {
    cli()
        .args([
            "window",
            "alice",
            "--start",
            "2025-10-22T11:00:00Z",
            "--end",
            "2025-10-22T09:00:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid window"));
}

#[test]
fn window_without_range_is_an_error() {
    cli()
        .args(["window", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--day"));
}

#[test]
fn unknown_timezone_is_an_error() {
    cli()
        .args(["--tz", "Mars/Base", "window", "alice", "--day", "2025-10-22"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

// ─────────────────────────────────────────────────────────────────────────────
// free-slots and conflicts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_slots_between_events() {
    cli()
        .args([
            "free-slots",
            "alice",
            "--start",
            "2025-10-22T08:00:00Z",
            "--end",
            "2025-10-22T17:00:00Z",
        ])
        .assert()
        .success()
        .stdout(
            "2025-10-22T08:00:00+00:00 .. 2025-10-22T09:00:00+00:00 (60 min)\n\
             2025-10-22T09:15:00+00:00 .. 2025-10-22T12:00:00+00:00 (165 min)\n\
             2025-10-22T13:00:00+00:00 .. 2025-10-22T17:00:00+00:00 (240 min)\n",
        );
}

#[test]
fn free_slots_minimum_duration_filters() {
    cli()
        .args([
            "free-slots",
            "alice",
            "--start",
            "2025-10-22T08:00:00Z",
            "--end",
            "2025-10-22T17:00:00Z",
            "--min-minutes",
            "200",
        ])
        .assert()
        .success()
        .stdout("2025-10-22T13:00:00+00:00 .. 2025-10-22T17:00:00+00:00 (240 min)\n");
}

#[test]
fn conflicts_listed_adjacent_ignored() {
    cli()
        .args(["conflicts", "carol"])
        .assert()
        .success()
        .stdout("Class <> Gym: 30 min\n");
}

#[test]
fn no_conflicts_message() {
    cli()
        .args(["conflicts", "alice"])
        .assert()
        .success()
        .stdout("no conflicts\n");
}

#[test]
fn conflicts_for_missing_owner_is_an_error() {
    cli()
        .args(["conflicts", "dave"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No schedule for owner 'dave'"));
}

#[test]
fn missing_schedule_file_is_an_error() {
    Command::cargo_bin("schedule-sync")
        .unwrap()
        .args(["-i", "/nonexistent/schedule.json", "status", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

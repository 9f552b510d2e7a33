use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("evently")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("signup"))
        .stdout(predicate::str::contains("events"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_events_help_shows_subcommands() {
    cargo_bin_cmd!("evently")
        .args(["events", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("create"));
}

#[test]
fn test_create_help_lists_event_fields() {
    cargo_bin_cmd!("evently")
        .args(["events", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--type"))
        .stdout(predicate::str::contains("--online"))
        .stdout(predicate::str::contains("--cover"));
}

#[test]
fn test_create_rejects_unknown_event_type() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", dir.path())
        .args(["events", "create", "--name", "Picnic", "--type", "party"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown event type"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("evently")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("evently"));
}

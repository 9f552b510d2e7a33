use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url ="));
    assert!(contents.contains("redirect_delay_ms ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_set_base_url_keeps_other_settings() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "redirect_delay_ms = 500\n").unwrap();

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", dir.path())
        .args(["config", "set-base-url", "http://events.test/api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base URL set to"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains(r#"base_url = "http://events.test/api""#));
    assert!(contents.contains("redirect_delay_ms = 500"));
}

#[test]
fn test_set_base_url_rejects_invalid_url() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", dir.path())
        .args(["config", "set-base-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));

    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_status_without_session() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", dir.path())
        .env_remove("EVENTLY_BASE_URL")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Status:  logged out"));
}

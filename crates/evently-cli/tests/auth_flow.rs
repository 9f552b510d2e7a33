//! Session and event commands against a mock event service.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a temp EVENTLY_HOME directory for test isolation.
fn temp_evently_home() -> TempDir {
    TempDir::new().expect("create temp evently home")
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn base_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

fn stored_token(home: &TempDir) -> Option<String> {
    let contents = fs::read_to_string(home.path().join("session.json")).ok()?;
    let value: serde_json::Value = serde_json::from_str(&contents).ok()?;
    value["token"].as_str().map(str::to_string)
}

async fn mount_events(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"_id": "1", "name": "Board Game Night", "date": "2024-06-05", "address": "Cafe"},
            {"_id": "2", "name": "Book Club", "date": "2024-06-07", "address": "Library"},
            {"_id": "3", "name": "Yoga", "date": "2024-06-09", "address": "Park"}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_stores_token_and_status_reports_it() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_evently_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "abc"})))
        .mount(&server)
        .await;

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", home.path())
        .env("EVENTLY_BASE_URL", base_url(&server))
        .env("EVENTLY_PASSWORD", "secret")
        .args(["login", "--email", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as ana@example.com"));

    assert_eq!(stored_token(&home).as_deref(), Some("abc"));

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", home.path())
        .env("EVENTLY_BASE_URL", base_url(&server))
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Status:  logged in"));
}

#[tokio::test]
async fn test_rejected_login_shows_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_evently_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", home.path())
        .env("EVENTLY_BASE_URL", base_url(&server))
        .args(["login", "--email", "ana@example.com", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert_eq!(stored_token(&home), None);
}

#[tokio::test]
async fn test_events_list_filters_by_name() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_evently_home();
    fs::write(home.path().join("session.json"), r#"{"token":"abc"}"#).unwrap();
    let server = MockServer::start().await;
    mount_events(&server).await;

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", home.path())
        .env("EVENTLY_BASE_URL", base_url(&server))
        .args(["events", "list", "--search", "bo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Board Game Night"))
        .stdout(predicate::str::contains("Book Club"))
        .stdout(predicate::str::contains("Yoga").not());

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", home.path())
        .env("EVENTLY_BASE_URL", base_url(&server))
        .args(["events", "list", "--search", "xyz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No events found."));
}

#[tokio::test]
async fn test_events_show_missing_event() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_evently_home();
    fs::write(home.path().join("session.json"), r#"{"token":"abc"}"#).unwrap();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/api/events/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", home.path())
        .env("EVENTLY_BASE_URL", base_url(&server))
        .args(["events", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Event 'nope' not found"));
}

#[tokio::test]
async fn test_create_event_posts_multipart_form() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_evently_home();
    fs::write(home.path().join("session.json"), r#"{"token":"abc"}"#).unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/events"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"_id": "99", "name": "Picnic"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", home.path())
        .env("EVENTLY_BASE_URL", base_url(&server))
        .args([
            "events", "create", "--name", "Picnic", "--address", "Park", "--date", "2024-06-05",
            "--time", "10:00", "--type", "social", "--online",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event created successfully (99)"));

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains(r#"name="eventType""#));
    assert!(body.contains("Social"));
    assert!(body.contains(r#"name="onlineSync""#));
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_evently_home();
    fs::write(home.path().join("session.json"), r#"{"token":"abc"}"#).unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/api/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", home.path())
        .env("EVENTLY_BASE_URL", base_url(&server))
        .arg("logout")
        .assert()
        .failure();

    assert_eq!(stored_token(&home), None);

    cargo_bin_cmd!("evently")
        .env("EVENTLY_HOME", home.path())
        .env("EVENTLY_BASE_URL", base_url(&server))
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

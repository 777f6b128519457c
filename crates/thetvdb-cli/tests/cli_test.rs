#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::collections::HashMap;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/thetvdb");

/// Command with every credential variable cleared and an empty config dir.
fn isolated_cmd(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("thetvdb");
    cmd.env_remove("THETVDB_API_KEY")
        .env_remove("THETVDB_USERNAME")
        .env_remove("THETVDB_USER_KEY")
        .env_remove("THETVDB_TOKEN")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir.path());
    cmd
}

/// Writes a config pointing the client at `base_url`.
fn write_config(dir: &tempfile::TempDir, base_url: &str) {
    let content = format!("[auth]\napi_key = \"APIKEY\"\n\n[client]\nbase_url = \"{base_url}\"\n");
    std::fs::write(dir.path().join("config.toml"), content).unwrap();
}

#[test]
fn test_help_lists_commands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("thetvdb");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("updates"));
}

#[test]
fn test_search_requires_a_filter() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("thetvdb");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn test_search_rejects_two_filters() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("thetvdb");
    cmd.args(["search", "--name", "Game of Thrones", "--imdb-id", "tt0944947"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_series_get_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("thetvdb");
    cmd.args(["series", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_user_ratings_rejects_unknown_item_type() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("thetvdb");
    cmd.args(["user", "ratings", "--item-type", "movie"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .args(["languages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("THETVDB_API_KEY"));
}

#[test]
fn test_updates_invalid_date() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .args(["updates", "--from", "last week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date: last week"));
}

#[test]
fn test_updates_to_before_from() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    isolated_cmd(&dir)
        .args(["updates", "--from", "2024-01-02", "--to", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--to must not be before --from"));
}

#[tokio::test]
async fn test_search_against_mock_server() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/login"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(r#"{"token":"t"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    let body = std::fs::read_to_string(format!("{FIXTURES}/search_game_of_thrones.json")).unwrap();
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/search/series"))
        .and(wiremock::matchers::query_param("name", "Game of Thrones"))
        .and(wiremock::matchers::header("Authorization", "Bearer t"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir, &mock_server.uri());

    // Act & Assert
    isolated_cmd(&dir)
        .args(["search", "--name", "Game of Thrones"])
        .assert()
        .success()
        .stdout(predicate::str::contains("121361"))
        .stdout(predicate::str::contains("Game of Thrones"));
}

#[tokio::test]
async fn test_configured_token_skips_login() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/login"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;
    let body = std::fs::read_to_string(format!("{FIXTURES}/languages.json")).unwrap();
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/languages"))
        .and(wiremock::matchers::header("Authorization", "Bearer saved-token"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir, &mock_server.uri());

    // Act & Assert
    isolated_cmd(&dir)
        .env("THETVDB_TOKEN", "saved-token")
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nederlands"))
        .stdout(predicate::str::contains("Total: 3 languages"));
}

#[tokio::test]
async fn test_login_save_writes_token() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/login"))
        .and(wiremock::matchers::body_json(HashMap::from([(
            "apikey", "APIKEY",
        )])))
        .respond_with(
            wiremock::ResponseTemplate::new(200).set_body_string(r#"{"token":"fresh-token"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir, &mock_server.uri());

    // Act
    isolated_cmd(&dir)
        .args(["login", "--save"])
        .assert()
        .success();

    // Assert
    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("token = \"fresh-token\""));
    assert!(saved.contains("api_key = \"APIKEY\""));
}

#[tokio::test]
async fn test_login_refused() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/login"))
        .respond_with(
            wiremock::ResponseTemplate::new(401).set_body_string(r#"{"Error":"Not Authorized"}"#),
        )
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir, &mock_server.uri());

    // Act & Assert
    isolated_cmd(&dir)
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not login: Not Authorized"));
}

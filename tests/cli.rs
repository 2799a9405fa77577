//! Command-line tests: exit codes, output formats and the scripted commands
//! against a mock comment service.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Nothing listens on the discard port.
const DEAD_SERVER: &str = "http://127.0.0.1:9";

/// Command with an isolated config directory and no inherited settings.
fn commenttree(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("commenttree").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("COMMENTTREE_SERVER")
        .env_remove("COMMENTTREE_CONFIG")
        .env_remove("COMMENTTREE_JSON")
        .env_remove("RUST_LOG");
    cmd
}

async fn mock_forest() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("parent", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": 1,
                "parent_id": 0,
                "text": "first",
                "created_at": "2024-05-01T10:00:00Z",
                "children": [{
                    "id": 2,
                    "parent_id": 1,
                    "text": "second",
                    "created_at": "2024-05-01T10:05:00Z",
                    "children": null,
                }],
            }],
            "total": 1,
        })))
        .mount(&server)
        .await;
    server
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    commenttree(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn completions_mention_binary() {
    let home = TempDir::new().unwrap();
    commenttree(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commenttree"));
}

#[test]
fn blank_post_is_a_usage_error_without_network() {
    let home = TempDir::new().unwrap();
    commenttree(&home)
        .args(["--server", DEAD_SERVER, "post", "   "])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("comment text is empty"));
}

#[test]
fn rank_order_is_rejected_for_trees() {
    let home = TempDir::new().unwrap();
    commenttree(&home)
        .args(["list", "--sort", "rank_desc"])
        .assert()
        .code(64);
}

#[test]
fn unreachable_server_reports_generic_network_error() {
    let home = TempDir::new().unwrap();
    commenttree(&home)
        .args(["--server", DEAD_SERVER, "list"])
        .assert()
        .code(69)
        .stderr(predicate::str::contains("Load failed: network error"));
}

#[test]
fn delete_without_terminal_requires_yes() {
    let home = TempDir::new().unwrap();
    commenttree(&home)
        .args(["--server", DEAD_SERVER, "delete", "5"])
        .write_stdin("")
        .assert()
        .code(64)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn config_init_then_path_and_show() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("custom.toml");
    let file_arg = file.to_str().unwrap();

    commenttree(&home)
        .args(["config", "init", "--config", file_arg])
        .assert()
        .success();
    assert!(file.exists());

    commenttree(&home)
        .args(["config", "init", "--config", file_arg])
        .assert()
        .code(64);

    commenttree(&home)
        .args(["config", "path", "--config", file_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));

    commenttree(&home)
        .args(["--json", "--server", "http://example.test:1", "config", "show", "--config", file_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"base_url\": \"http://example.test:1\""));
}

#[test]
fn missing_explicit_config_is_not_found() {
    let home = TempDir::new().unwrap();
    commenttree(&home)
        .args(["--config", "/nonexistent/commenttree.toml", "list"])
        .assert()
        .code(3);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_prints_indented_tree() {
    let server = mock_forest().await;
    let home = TempDir::new().unwrap();

    commenttree(&home)
        .args(["--server", &server.uri(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] first · 2024-05-01 10:00"))
        .stdout(predicate::str::contains("  └ [2] second · 2024-05-01 10:05"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_json_has_rows_with_depth() {
    let server = mock_forest().await;
    let home = TempDir::new().unwrap();

    let output = commenttree(&home)
        .args(["--server", &server.uri(), "--json", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["sort"], "created_at_desc");
    assert_eq!(value["root_id"], serde_json::Value::Null);
    assert_eq!(value["rows"][1]["id"], 2);
    assert_eq!(value["rows"][1]["depth"], 1);
    assert_eq!(value["rows"][1]["root_id"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn search_prints_rounded_rank_and_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments/search"))
        .and(query_param("q", "foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": 5,
                "parent_id": 1,
                "snippet": "<b>foo</b>",
                "rank": 0.5001,
                "created_at": "2024-05-01T10:00:00Z",
            }],
            "total": 1,
        })))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    commenttree(&home)
        .args(["--server", &server.uri(), "search", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[5] <b>foo</b> · rank 0.500"))
        .stdout(predicate::str::contains("Found: 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn open_with_empty_path_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments/path"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    commenttree(&home)
        .args(["--server", &server.uri(), "open", "42"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Path not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn confirmed_delete_reports_count() {
    let server = mock_forest().await;
    Mock::given(method("DELETE"))
        .and(path("/comments/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deleted": 2 })))
        .expect(1)
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    commenttree(&home)
        .args(["--server", &server.uri(), "delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: 2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn backend_error_exits_general() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "text too long" })))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    commenttree(&home)
        .args(["--server", &server.uri(), "post", "hello"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Post failed: text too long"));
}

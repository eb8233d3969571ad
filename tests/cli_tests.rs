//! CLI integration tests
//!
//! Every test runs against its own `KDOCS_HOME`; network tests use a local
//! mock server in place of the document service.

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the kdocs binary with an isolated data root
fn kdocs(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kdocs").unwrap();
    cmd.env("KDOCS_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("groupid")
        .env_remove("fileid")
        .env_remove("parentFileid")
        .env_remove("wps_cache_dir");
    cmd
}

/// Point the base URL at a mock server and store a session
fn logged_in_against(home: &TempDir, server: &mockito::Server) {
    kdocs(home)
        .args(["config", "set", "api.base_url", &server.url()])
        .assert()
        .success();
    kdocs(home).args(["login", "test-sid"]).assert().success();
}

fn feedback(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────
// Surface Tests
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    kdocs(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search and browse Kingsoft Docs"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    kdocs(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kdocs"));
}

#[test]
fn test_query_help() {
    let home = TempDir::new().unwrap();
    kdocs(&home)
        .args(["query", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--groupid"))
        .stdout(predicate::str::contains("--parent-fileid"))
        .stdout(predicate::str::contains("--cache-dir"));
}

#[test]
fn test_invalid_command() {
    let home = TempDir::new().unwrap();
    kdocs(&home)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    kdocs(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kdocs"));
}

// ─────────────────────────────────────────────────────────────────────────
// Config and Cache Tests
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    kdocs(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains("\"exists\": false"));
}

#[test]
fn test_config_set_then_show() {
    let home = TempDir::new().unwrap();
    kdocs(&home)
        .args(["config", "set", "cache.search_mins", "7"])
        .assert()
        .success();

    kdocs(&home)
        .args(["-o", "pretty", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search_mins = 7"));
}

#[test]
fn test_config_set_unknown_key_is_usage_error() {
    let home = TempDir::new().unwrap();
    kdocs(&home)
        .args(["config", "set", "cache.never_mins", "7"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_cache_status() {
    let home = TempDir::new().unwrap();
    kdocs(&home)
        .args(["-o", "pretty", "cache", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache Status"));
}

// ─────────────────────────────────────────────────────────────────────────
// Query Tests
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_query_without_login_is_notice() {
    let home = TempDir::new().unwrap();
    let output = kdocs(&home).arg("query").assert().success().get_output().stdout.clone();

    let value = feedback(&output);
    assert_eq!(value["items"][0]["title"], "Not logged in");
    assert_eq!(value["items"][0]["valid"], false);
}

#[test]
fn test_recent_is_cached_between_invocations() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v3/roaming")
        .match_header("cookie", "wps_sid=test-sid")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"[
                {"fileid": "1", "name": "a.docx", "mtime": 1600000000000, "path": "/tmp/a.docx"},
                {"fileid": "2", "name": "b.pdf", "mtime": 1600000000000, "path": "/tmp/b.pdf"},
                {"fileid": "3", "name": "c.xlsx", "mtime": 1600000000000, "path": "/tmp/c.xlsx"}
            ]"#,
        )
        .expect(1)
        .create();
    logged_in_against(&home, &server);

    for _ in 0..2 {
        let output = kdocs(&home).arg("query").assert().success().get_output().stdout.clone();
        let value = feedback(&output);
        let items = value["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0]["title"], "Browse");
        assert_eq!(items[3]["title"], "c.xlsx");
        assert_eq!(items[3]["quicklookurl"], "/tmp/c.xlsx");
    }

    mock.assert();
}

#[test]
fn test_search_with_no_hits() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v3/search/files")
        .match_query(Matcher::UrlEncoded("searchname".into(), "zzz".into()))
        .with_status(200)
        .with_body(r#"{"total": 0, "status": 0, "files": []}"#)
        .create();
    logged_in_against(&home, &server);

    let output = kdocs(&home).args(["query", "zzz"]).assert().success().get_output().stdout.clone();

    assert_eq!(feedback(&output)["items"][0]["title"], "No files found");
}

#[test]
fn test_browse_group_then_folder_by_path() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v5/groups/special/files")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"result": "ok", "files": [
                {"fname": "Team", "id": 900, "groupid": 5, "linkgroupid": 77, "ftype": "linkfolder"}
            ]}"#,
        )
        .create();
    let folder = server
        .mock("GET", "/v5/groups/77/files")
        .match_query(Matcher::UrlEncoded("parentid".into(), "900".into()))
        .with_status(200)
        .with_body(r#"{"result": "ok", "files": [{"fname": "Specs", "id": 21, "groupid": 77, "ftype": "folder"}]}"#)
        .create();
    logged_in_against(&home, &server);

    kdocs(&home).args(["query", "/"]).assert().success();
    let output = kdocs(&home).args(["query", "/Team"]).assert().success().get_output().stdout.clone();

    folder.assert();
    let value = feedback(&output);
    assert_eq!(value["items"][0]["title"], "..");
    assert_eq!(value["items"][1]["title"], "Specs");
    assert_eq!(value["items"][1]["variables"]["groupid"], "77");
    assert_eq!(value["items"][1]["variables"]["path"], "/Team/Specs");
}

#[test]
fn test_server_error_is_notice_not_crash() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v5/groups/special/files")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create();
    logged_in_against(&home, &server);

    let output = kdocs(&home).args(["query", "/"]).assert().success().get_output().stdout.clone();

    let value = feedback(&output);
    assert_eq!(value["items"][0]["title"], "Query failed");
    assert_eq!(value["items"][1]["title"], "Recent");
}

#[test]
fn test_logout_clears_session() {
    let home = TempDir::new().unwrap();
    kdocs(&home).args(["login", "abc"]).assert().success();

    kdocs(&home).arg("logout").assert().success();

    let output = kdocs(&home).arg("query").assert().success().get_output().stdout.clone();
    assert_eq!(feedback(&output)["items"][0]["title"], "Not logged in");
}

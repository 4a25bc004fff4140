//! End-to-end tests for `cli::execute`: event file, repository metadata,
//! file listing and content fetches against a wiremock server.

use std::fs;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::Parser;
use confcheck_cli::cli::{Cli, execute};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_event(dir: &TempDir) -> PathBuf {
    let event = dir.path().join("event.json");
    fs::write(
        &event,
        r#"{ "action": "opened", "number": 3, "pull_request": { "head": { "ref": "feature", "sha": "abc123" } } }"#,
    )
    .unwrap();
    event
}

fn cli(server: &MockServer, event: &std::path::Path, extra: &[&str]) -> Cli {
    let event = event.to_string_lossy().into_owned();
    let api_url = server.uri();
    let mut argv = vec![
        "confcheck",
        "--token",
        "access-token",
        "--event-path",
        event.as_str(),
        "--repository",
        "octo-org/settings",
        "--api-url",
        api_url.as_str(),
        "--newline",
        "true",
    ];
    argv.extend_from_slice(extra);
    Cli::try_parse_from(argv).unwrap()
}

async fn mount_file(server: &MockServer, file: &str, content: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/octo-org/settings/contents/{file}")))
        .and(query_param("ref", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "encoding": "base64",
            "content": STANDARD.encode(content),
        })))
        .mount(server)
        .await;
}

async fn mount_listing(server: &MockServer, files: &[&str]) {
    let body: Vec<_> = files
        .iter()
        .map(|f| json!({ "filename": f, "status": "modified" }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/settings/pulls/3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_all_files_valid() {
    let server = MockServer::start().await;
    mount_listing(&server, &["app.json", "deploy/values.yaml", "logo.png"]).await;
    mount_file(&server, "app.json", "{\"name\": \"app\"}\n").await;
    mount_file(&server, "deploy/values.yaml", "replicas: 2\n").await;

    let tmp = TempDir::new().unwrap();
    let event = write_event(&tmp);
    let mut out = Vec::new();
    let ok = execute(&cli(&server, &event, &[]), &mut out).await.unwrap();

    assert!(ok);
    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("Files checked:  2"), "{report}");
    assert!(report.contains("All 2 files passed validation"));
}

#[tokio::test]
async fn test_invalid_files_json_report() {
    let server = MockServer::start().await;
    mount_listing(&server, &["app.json", "infra/main.hcl", "setup.ini"]).await;
    mount_file(&server, "app.json", "{\"name\": \"app\"}").await;
    mount_file(&server, "infra/main.hcl", "example {\n  foo = \"\n}\n").await;
    mount_file(&server, "setup.ini", "[core]\nname = x\n").await;

    let tmp = TempDir::new().unwrap();
    let event = write_event(&tmp);
    let mut out = Vec::new();
    let ok = execute(&cli(&server, &event, &["--format", "json"]), &mut out)
        .await
        .unwrap();

    assert!(!ok);
    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["checked"], 3);
    assert_eq!(report["invalid"], 2);
    assert_eq!(report["validations"][0]["failed_checks"], json!(["newline"]));
    assert_eq!(report["validations"][1]["failed_checks"], json!(["syntax"]));
    assert_eq!(report["validations"][2]["valid"], true);
}

#[tokio::test]
async fn test_missing_token_is_fatal() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    let event = write_event(&tmp);

    let mut cli = cli(&server, &event, &[]);
    cli.token = None;
    let err = execute(&cli, &mut Vec::new()).await.unwrap_err();
    assert!(err.to_string().contains("Missing GitHub access token"));
}

#[tokio::test]
async fn test_malformed_repository_is_fatal() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    let event = write_event(&tmp);

    let mut cli = cli(&server, &event, &[]);
    cli.repository = "no-slash".to_owned();
    let err = execute(&cli, &mut Vec::new()).await.unwrap_err();
    assert!(err.to_string().contains("Malformed repository metadata"));
}

#[tokio::test]
async fn test_unreadable_event_is_fatal() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();

    let cli = cli(&server, &tmp.path().join("missing.json"), &[]);
    let err = execute(&cli, &mut Vec::new()).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read event file"));
}

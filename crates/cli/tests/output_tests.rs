//! Integration tests for report output: formats, file output and stream separation.

mod common;

use common::{endpoints_file, mount_get, mount_login, smoke_runner_with_credentials};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::MockServer;

/// Login plus five probes of which one fails.
async fn mixed_server() -> MockServer {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_get(&server, "/health", 200).await;
    mount_get(&server, "/api/v1/items", 200).await;
    mount_get(&server, "/api/v1/users/me", 200).await;
    mount_get(&server, "/api/v1/reports", 503).await;
    mount_get(&server, "/api/v1/admin", 403).await;
    server
}

fn mixed_plan(dir: &TempDir) -> std::path::PathBuf {
    endpoints_file(
        dir,
        &[
            "# five probes, one expected to fail",
            "GET /health 200",
            "GET /api/v1/items 200",
            "GET /api/v1/users/me 200",
            "GET /api/v1/reports 200",
            "GET /api/v1/admin 401,403",
        ],
    )
}

#[tokio::test]
async fn test_text_summary_line() {
    let server = mixed_server().await;
    let dir = TempDir::new().unwrap();
    let file = mixed_plan(&dir);

    let output = smoke_runner_with_credentials(&server.uri())
        .args(["--quiet", "--endpoints-file"])
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total: 5, Passed: 4, Failed: 1, Success rate: 80.0%"));
    assert!(stdout.contains("Failures:"));
    assert_eq!(stdout.lines().filter(|l| l.starts_with("PASS")).count(), 4);
}

#[tokio::test]
async fn test_json_report_on_stdout() {
    let server = mixed_server().await;
    let dir = TempDir::new().unwrap();
    let file = mixed_plan(&dir);

    let output = smoke_runner_with_credentials(&server.uri())
        .args(["--quiet", "--output", "json", "--endpoints-file"])
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["total"], 5);
    assert_eq!(report["summary"]["passed"], 4);
    assert_eq!(report["summary"]["failed"], 1);
    assert_eq!(report["summary"]["success_rate"], 80.0);

    let results = report["results"].as_array().unwrap();
    let endpoints: Vec<_> = results
        .iter()
        .map(|r| r["endpoint"].as_str().unwrap())
        .collect();
    assert_eq!(
        endpoints,
        [
            "/health",
            "/api/v1/items",
            "/api/v1/users/me",
            "/api/v1/reports",
            "/api/v1/admin"
        ]
    );
    assert_eq!(results[3]["status_code"], 503);
    assert_eq!(results[4]["passed"], true);
}

#[tokio::test]
async fn test_csv_report() {
    let server = mixed_server().await;
    let dir = TempDir::new().unwrap();
    let file = mixed_plan(&dir);

    smoke_runner_with_credentials(&server.uri())
        .args(["--quiet", "-o", "csv", "--endpoints-file"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            "endpoint,method,status_code,expected_status,passed,elapsed_ms,error_detail\n",
        ))
        .stdout(predicate::str::contains("/api/v1/admin,GET,403,\"401,403\",true,"));
}

#[tokio::test]
async fn test_output_file_keeps_stdout_empty() {
    let server = mixed_server().await;
    let dir = TempDir::new().unwrap();
    let file = mixed_plan(&dir);
    let report_path = dir.path().join("out").join("report.json");

    smoke_runner_with_credentials(&server.uri())
        .args(["--quiet", "--output", "json", "--output-file"])
        .arg(&report_path)
        .arg("--endpoints-file")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Results written to"));

    let content = fs::read_to_string(&report_path).unwrap();
    let report: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(report["summary"]["failed"], 1);
}

#[tokio::test]
async fn test_run_subcommand_matches_default() {
    let server = mixed_server().await;
    let dir = TempDir::new().unwrap();
    let file = mixed_plan(&dir);

    smoke_runner_with_credentials(&server.uri())
        .args(["run", "--quiet", "--endpoints-file"])
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Success rate: 80.0%"));
}

#[tokio::test]
async fn test_endpoints_file_from_env() {
    let server = mixed_server().await;
    let dir = TempDir::new().unwrap();
    let file = endpoints_file(&dir, &["GET /health 200"]);

    smoke_runner_with_credentials(&server.uri())
        .env("PROBE_ENDPOINTS_FILE", &file)
        .arg("--quiet")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Total: 1, Passed: 1"));
}

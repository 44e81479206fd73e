//! Shared test utilities for smoke-runner integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Mount the login endpoint and write endpoints files for a test run.
//!
//! Invariants / Assumptions:
//! - Every command built here starts with no BASE_URL, IRIS_* or PROBE_*
//!   variables inherited from the host.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN_PATH: &str = "/api/v1/auth/login";
pub const TEST_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.smoke-test-token.c2lnbmF0dXJl";

const HOST_VARS: &[&str] = &[
    "BASE_URL",
    "IRIS_USERNAME",
    "IRIS_PASSWORD",
    "IRIS_PASSWORD_KEYRING_ACCOUNT",
    "IRIS_TOKEN",
    "PROBE_ENDPOINTS_FILE",
    "PROBE_OTLP_ENDPOINT",
    "PROBE_SKIP_VERIFY",
    "PROBE_TIMEOUT",
    "PROBE_MAX_RETRIES",
    "PROBE_RETRY_BACKOFF_MS",
    "PROBE_DEADLINE",
    "PROBE_LOGIN_PATH",
    "PROBE_LOGIN_ENCODING",
    "PROBE_HEALTH_PATH",
    "PROBE_READY_INTERVAL",
    "PROBE_READY_TIMEOUT",
    "RUST_LOG",
];

/// Returns a hermetic `smoke-runner` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Connection and credential env vars are cleared.
/// - Transport retries back off for 10ms instead of a second.
pub fn smoke_runner_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("smoke-runner");

    cmd.env("DOTENV_DISABLED", "1");
    for var in HOST_VARS {
        cmd.env_remove(var);
    }
    cmd.env("PROBE_RETRY_BACKOFF_MS", "10");

    cmd
}

/// A hermetic command pointed at `base_url` with `admin`/`secret` credentials
/// supplied through the environment.
pub fn smoke_runner_with_credentials(base_url: &str) -> Command {
    let mut cmd = smoke_runner_cmd();
    cmd.env("BASE_URL", base_url)
        .env("IRIS_USERNAME", "admin")
        .env("IRIS_PASSWORD", "secret");
    cmd
}

/// Accept `admin`/`secret` on the login endpoint and issue `TEST_TOKEN`.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_string_contains("username=admin"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": TEST_TOKEN,
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

/// Reject every login attempt with 401.
pub async fn mount_login_rejected(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Incorrect username or password"})),
        )
        .mount(server)
        .await;
}

/// Respond to `GET <route>` with `status`.
pub async fn mount_get(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
        .mount(server)
        .await;
}

/// Write an endpoints file into `dir` and return its path.
pub fn endpoints_file(dir: &TempDir, lines: &[&str]) -> PathBuf {
    let path = dir.path().join("endpoints.txt");
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&path, content).expect("write endpoints file");
    path
}

/// A base URL nothing listens on.
pub fn unreachable_base_url() -> &'static str {
    "http://127.0.0.1:1"
}

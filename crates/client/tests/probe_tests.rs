//! Probe executor tests.
//!
//! This module tests single-probe classification:
//! - Status membership decides pass/fail, including expected 4xx and 3xx
//! - Redirects are reported as-is, never followed
//! - Failure detail quotes the expected set, actual status and body snippet
//! - Bearer token attachment and the `noauth` opt-out
//! - Request bodies and absolute URL targets
//! - Unreachable hosts recorded as status 0
//!
//! # What this does NOT handle
//! - Retry timing (see retry_tests.rs)
//! - Batch sequencing and deadlines (see runner_tests.rs)

mod common;

use common::*;
use probe_client::ProbeBody;
use wiremock::matchers::{body_json, header, method, path};

#[tokio::test]
async fn test_health_probe_passes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("health/ok.json")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, AuthStrategy::Anonymous);
    let result = client.execute(&ProbeRequest::get("/health")).await;

    assert!(result.passed());
    assert_eq!(result.status_code(), 200);
    assert_eq!(result.endpoint(), "/health");
    assert_eq!(result.method(), HttpMethod::Get);
    assert!(result.error_detail().is_none());
}

#[tokio::test]
async fn test_expected_401_passes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "Incorrect username or password"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, AuthStrategy::Anonymous);
    let probe = ProbeRequest::new(HttpMethod::Post, LOGIN_PATH)
        .expect(expect(&[401]))
        .with_body(ProbeBody::Form("username=admin&password=wrong".to_string()));
    let result = client.execute(&probe).await;

    assert!(result.passed(), "401 was expected: {result:?}");
    assert_eq!(result.status_code(), 401);
}

async fn mount_login_redirect(mock_server: &MockServer) {
    Mock::given(path("/admin"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login"))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("login page"))
        .expect(0)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_expected_redirect_passes_without_following() {
    let mock_server = MockServer::start().await;
    mount_login_redirect(&mock_server).await;

    let client = client_for(&mock_server, AuthStrategy::Anonymous);
    let result = client
        .execute(&ProbeRequest::get("/admin").expect(expect(&[302])))
        .await;

    assert!(result.passed(), "302 was expected: {result:?}");
    assert_eq!(result.status_code(), 302);
}

#[tokio::test]
async fn test_redirect_to_login_page_fails_expected_200() {
    let mock_server = MockServer::start().await;
    mount_login_redirect(&mock_server).await;

    let client = client_for(&mock_server, AuthStrategy::Anonymous);
    let probe = ProbeRequest::new(HttpMethod::Post, "/admin")
        .with_body(ProbeBody::Json(r#"{"op":"noop"}"#.to_string()));
    let result = client.execute(&probe).await;

    assert!(!result.passed());
    assert_eq!(result.status_code(), 302);
    assert_eq!(result.error_detail(), Some("expected 200, got 302"));
}

#[tokio::test]
async fn test_unexpected_status_records_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("  database\n  unavailable  "))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, AuthStrategy::Anonymous);
    let probe = ProbeRequest::get("/api/v1/items").expect(expect(&[200, 204]));
    let result = client.execute(&probe).await;

    assert!(!result.passed());
    assert_eq!(result.status_code(), 500);
    assert_eq!(
        result.error_detail(),
        Some("expected 200,204, got 500: database unavailable")
    );
}

#[tokio::test]
async fn test_long_body_snippet_truncated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(ResponseTemplate::new(404).set_body_string("x".repeat(1000)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, AuthStrategy::Anonymous);
    let result = client.execute(&ProbeRequest::get("/big")).await;

    let detail = result.error_detail().unwrap();
    assert!(detail.starts_with("expected 200, got 404: "));
    assert!(detail.ends_with("..."));
    assert!(detail.len() < 260, "detail should be truncated: {} bytes", detail.len());
}

#[tokio::test]
async fn test_bearer_token_attached_after_login() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "probe-token").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer probe-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server, admin());
    client.login().await.unwrap();

    let result = client.execute(&ProbeRequest::get("/api/v1/users/me")).await;
    assert!(result.passed(), "{result:?}");
}

#[tokio::test]
async fn test_noauth_probe_omits_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/public"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, AuthStrategy::bearer("pre-issued"));
    let result = client
        .execute(&ProbeRequest::get("/public").without_auth())
        .await;
    assert!(result.passed());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_json_body_and_custom_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/items/1"))
        .and(header("content-type", "application/json"))
        .and(header("x-request-source", "smoke"))
        .and(body_json(serde_json::json!({"name": "probe"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, AuthStrategy::Anonymous);
    let probe = ProbeRequest::new(HttpMethod::Put, "/api/v1/items/1")
        .with_body(ProbeBody::Json(r#"{"name": "probe"}"#.to_string()))
        .with_header("x-request-source", "smoke");

    assert!(client.execute(&probe).await.passed());
}

#[tokio::test]
async fn test_absolute_url_target_used_verbatim() {
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&other_server)
        .await;

    let client = ProbeClient::builder()
        .base_url(unreachable_base_url())
        .retry_policy(RetryPolicy::none())
        .build()
        .unwrap();
    let probe = ProbeRequest::get(format!("{}/status", other_server.uri())).expect(expect(&[204]));

    assert!(client.execute(&probe).await.passed());
}

#[tokio::test]
async fn test_head_probe() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, AuthStrategy::Anonymous);
    let result = client
        .execute(&ProbeRequest::new(HttpMethod::Head, "/health"))
        .await;
    assert!(result.passed());
}

#[tokio::test]
async fn test_unreachable_host_records_status_zero() {
    let client = ProbeClient::builder()
        .base_url(unreachable_base_url())
        .retry_policy(RetryPolicy::none())
        .build()
        .unwrap();

    let result = client.execute(&ProbeRequest::get("/health")).await;

    assert!(!result.passed());
    assert_eq!(result.status_code(), 0);
    assert!(result.is_transport_failure());
    let detail = result.error_detail().unwrap();
    assert!(!detail.is_empty());
    assert!(detail.contains("1 attempt(s)"), "detail was: {detail}");
}

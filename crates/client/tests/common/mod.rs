//! Common test utilities for integration tests.
//!
//! Shared mock-server setup and client construction so every test talks to
//! wiremock the same way.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Clients built here retry quickly so transport tests stay fast
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

use std::time::Duration;

#[allow(unused_imports)]
pub use probe_client::testing::load_fixture;

#[allow(unused_imports)]
pub use probe_client::{
    AuthStrategy, ClientError, ExpectedStatus, HttpMethod, ProbeClient, ProbeRequest, RetryPolicy,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Retry policy used by tests: two retries, 20ms apart.
#[allow(dead_code)]
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(2, Duration::from_millis(20))
}

/// Build a client against the mock server with fast retries.
#[allow(dead_code)]
pub fn client_for(server: &MockServer, auth: AuthStrategy) -> ProbeClient {
    ProbeClient::builder()
        .base_url(server.uri())
        .auth_strategy(auth)
        .retry_policy(fast_retry())
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client should build")
}

#[allow(dead_code)]
pub fn admin() -> AuthStrategy {
    AuthStrategy::credentials("admin", "secret")
}

/// Mount a login endpoint that issues `token` for any credentials.
#[allow(dead_code)]
pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

/// A base URL on a local port nothing listens on.
#[allow(dead_code)]
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[allow(dead_code)]
pub fn expect(codes: &[u16]) -> ExpectedStatus {
    ExpectedStatus::new(codes.iter().copied()).expect("valid status codes")
}

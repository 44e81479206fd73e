//! Generic probe request.

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Instant;
use tracing::debug;

use crate::endpoints::request::{RetryPolicy, body_snippet, send_with_retry};
use crate::models::{ProbeRequest, ProbeResult};

/// Issue one probe and classify the outcome.
///
/// Never fails: transport errors become a result with status 0 and the
/// error text in `error_detail`. The body is only read when the status is
/// unexpected, to explain the failure.
pub async fn send_probe(
    client: &Client,
    base_url: &str,
    bearer_token: Option<&str>,
    request: &ProbeRequest,
    retry: RetryPolicy,
) -> ProbeResult {
    let started = Instant::now();
    let url = request.resolve_url(base_url);

    let mut builder = client.request(request.method.to_reqwest(), &url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if request.authenticated
        && let Some(token) = bearer_token
    {
        builder = builder.bearer_auth(token);
    }
    if let Some(body) = &request.body {
        builder = builder
            .header(CONTENT_TYPE, body.content_type())
            .body(body.payload().to_string());
    }

    match send_with_retry(builder, &url, retry).await {
        Ok(response) => {
            let status = response.status().as_u16();
            let snippet = if request.expected.contains(status) {
                None
            } else {
                // An unreadable body only loses the snippet
                let body = response.text().await.unwrap_or_default();
                Some(body_snippet(&body))
            };
            debug!(method = %request.method, url = %url, status, "Probe response");
            ProbeResult::from_status(
                request.target.clone(),
                request.method,
                request.expected.clone(),
                status,
                snippet.as_deref(),
                started.elapsed(),
            )
        }
        Err(e) => {
            debug!(method = %request.method, url = %url, error = %e, "Probe transport failure");
            ProbeResult::transport_failure(
                request.target.clone(),
                request.method,
                request.expected.clone(),
                e.to_string(),
                started.elapsed(),
            )
        }
    }
}

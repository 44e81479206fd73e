//! Retry helper for HTTP requests with a fixed backoff.
//!
//! Only failures below HTTP (refused connections, DNS errors, timeouts) are
//! retried. Any HTTP response, including 4xx and 5xx, is returned to the
//! caller on the first attempt.

use std::time::Duration;

use probe_config::ConnectionConfig;
use probe_config::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_SNIPPET_CHARS,
};
use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result, TransportKind, error_chain_text};
use crate::tracing::inject_trace_context;

/// How many times to retry a transport failure and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: usize, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Total attempts including the first.
    pub fn attempts(&self) -> usize {
        self.max_retries + 1
    }
}

impl From<&ConnectionConfig> for RetryPolicy {
    fn from(connection: &ConnectionConfig) -> Self {
        Self::new(connection.max_retries, connection.retry_backoff)
    }
}

/// Sends an HTTP request, retrying transport failures per `policy`.
///
/// # Errors
///
/// - `ClientError::Transport` when every attempt failed below HTTP.
/// - `ClientError::InvalidRequest` when the request could not be built
///   (bad header value, unsupported URL); these are never retried.
pub async fn send_with_retry(
    builder: RequestBuilder,
    url: &str,
    policy: RetryPolicy,
) -> Result<Response> {
    let mut last_error: Option<reqwest::Error> = None;
    let mut attempts = 0;

    for attempt in 0..policy.attempts() {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                // Streaming bodies cannot be replayed
                if attempt == 0 {
                    debug!("Request builder cannot be cloned, single attempt only");
                    return inject_trace_context(builder)
                        .send()
                        .await
                        .map_err(|e| transport_error(e, url, 1));
                }
                break;
            }
        };

        attempts = attempt + 1;
        match inject_trace_context(attempt_builder).send().await {
            Ok(response) => {
                if attempt > 0 {
                    debug!(attempt = attempts, "Request succeeded after retry");
                }
                return Ok(response);
            }
            Err(e) if e.is_builder() => {
                return Err(ClientError::InvalidRequest(error_chain_text(&e)));
            }
            Err(e) => {
                let kind = TransportKind::classify(&e);
                if attempt < policy.max_retries {
                    debug!(
                        attempt = attempts,
                        max_attempts = policy.attempts(),
                        kind = %kind,
                        backoff_ms = policy.backoff.as_millis() as u64,
                        url,
                        "Transport failure, retrying after fixed backoff"
                    );
                    tokio::time::sleep(policy.backoff).await;
                } else {
                    debug!(attempts, kind = %kind, url, "Retries exhausted");
                }
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(transport_error(e, url, attempts)),
        None => Err(ClientError::InvalidRequest(format!(
            "request to {url} could not be retried"
        ))),
    }
}

fn transport_error(err: reqwest::Error, url: &str, attempts: usize) -> ClientError {
    if err.is_builder() {
        return ClientError::InvalidRequest(error_chain_text(&err));
    }
    ClientError::Transport {
        kind: TransportKind::classify(&err),
        url: url.to_string(),
        message: error_chain_text(&err),
        attempts,
    }
}

/// Read a response body as text, mapping read failures to a transport error.
pub(crate) async fn read_body(response: Response, url: &str) -> Result<String> {
    response
        .text()
        .await
        .map_err(|e| transport_error(e, url, 1))
}

/// Collapse whitespace and truncate a response body for error messages.
pub fn body_snippet(body: &str) -> String {
    snippet_with_limit(body, DEFAULT_SNIPPET_CHARS)
}

pub(crate) fn snippet_with_limit(body: &str, max_chars: usize) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(max_chars).collect();
    format!("{truncated}...")
}

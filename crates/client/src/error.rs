//! Error types for the probe client.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Coarse classification of a failure below the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The TCP connection was refused or reset.
    ConnectionRefused,
    /// Name resolution or connect failed for another reason.
    Connect,
    /// The request did not complete within the per-request timeout.
    Timeout,
    /// TLS handshake or certificate validation failed.
    Tls,
    /// Anything else reported by the HTTP stack (body read, decode, ...).
    Other,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ConnectionRefused => "connection refused",
            Self::Connect => "connect error",
            Self::Timeout => "timed out",
            Self::Tls => "TLS error",
            Self::Other => "transport error",
        };
        f.write_str(label)
    }
}

impl TransportKind {
    /// Classify a `reqwest::Error` that carries no HTTP status.
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        let chain = error_chain_text(err).to_ascii_lowercase();
        if chain.contains("certificate") || chain.contains("tls") || chain.contains("handshake") {
            Self::Tls
        } else if chain.contains("connection refused") || chain.contains("connection reset") {
            Self::ConnectionRefused
        } else if err.is_connect() {
            Self::Connect
        } else {
            Self::Other
        }
    }
}

/// Flatten an error and its sources into one line.
pub(crate) fn error_chain_text(err: &(dyn std::error::Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// Errors that can occur during client operations.
///
/// Probe execution never surfaces these directly; they are folded into a
/// failed `ProbeResult`. Only login and readiness waits return them.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The login endpoint rejected the credentials or returned no token.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// A 2xx response whose body could not be understood.
    #[error("Malformed response from {url}: {message} (body: {snippet:?})")]
    MalformedResponse {
        url: String,
        message: String,
        snippet: String,
    },

    /// The request never produced an HTTP response, after all retries.
    #[error("{kind} calling {url} after {attempts} attempt(s): {message}")]
    Transport {
        kind: TransportKind,
        url: String,
        message: String,
        attempts: usize,
    },

    /// An HTTP response with a status outside the expected set.
    #[error("Unexpected status {status} from {url}: {snippet}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        snippet: String,
    },

    /// The run-level or readiness deadline passed.
    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A request that cannot be sent as described.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP client construction or other reqwest failure outside a request.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl ClientError {
    /// Check if this error is a transport-level failure (no HTTP response).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::DeadlineExceeded(_))
    }

    /// Check if this error should be retried by the request layer.
    ///
    /// Only failures below HTTP are retryable; every HTTP status is final.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed(_) | Self::MalformedResponse { .. })
    }
}

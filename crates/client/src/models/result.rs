//! Outcome of a single probe.

use serde::Serialize;
use std::time::Duration;

use super::probe::{ExpectedStatus, HttpMethod};

/// Outcome of one probe.
///
/// `passed` is always `expected_status.contains(status_code)`; both
/// constructors compute it and there is no way to set it directly.
/// A `status_code` of 0 means no HTTP response was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    endpoint: String,
    method: HttpMethod,
    status_code: u16,
    expected_status: ExpectedStatus,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_detail: Option<String>,
    elapsed_ms: u64,
}

impl ProbeResult {
    /// Result for a probe that received an HTTP response.
    ///
    /// `body_snippet` is only used to explain a failure.
    pub fn from_status(
        endpoint: impl Into<String>,
        method: HttpMethod,
        expected_status: ExpectedStatus,
        status_code: u16,
        body_snippet: Option<&str>,
        elapsed: Duration,
    ) -> Self {
        let passed = expected_status.contains(status_code);
        let error_detail = (!passed).then(|| match body_snippet.filter(|s| !s.is_empty()) {
            Some(snippet) => {
                format!("expected {expected_status}, got {status_code}: {snippet}")
            }
            None => format!("expected {expected_status}, got {status_code}"),
        });
        Self {
            endpoint: endpoint.into(),
            method,
            status_code,
            expected_status,
            passed,
            error_detail,
            elapsed_ms: duration_ms(elapsed),
        }
    }

    /// Result for a probe that never received an HTTP response.
    pub fn transport_failure(
        endpoint: impl Into<String>,
        method: HttpMethod,
        expected_status: ExpectedStatus,
        detail: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        let detail = detail.into();
        let detail = if detail.trim().is_empty() {
            "transport failure".to_string()
        } else {
            detail
        };
        Self {
            endpoint: endpoint.into(),
            method,
            status_code: 0,
            passed: expected_status.contains(0),
            expected_status,
            error_detail: Some(detail),
            elapsed_ms: duration_ms(elapsed),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// HTTP status received, or 0 on transport failure.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn expected_status(&self) -> &ExpectedStatus {
        &self.expected_status
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }

    pub fn is_transport_failure(&self) -> bool {
        self.status_code == 0
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }
}

fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

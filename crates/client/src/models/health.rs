//! Health endpoint response.

use serde::{Deserialize, Serialize};

/// Body of the liveness endpoint, e.g. `{"status": "ok"}`.
///
/// Fields other than `status` are kept for display.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    /// Whether the reported status means the service is ready.
    pub fn is_ready(&self) -> bool {
        matches!(
            self.status.trim().to_ascii_lowercase().as_str(),
            "ok" | "healthy" | "up" | "pass"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_statuses() {
        for body in [
            r#"{"status":"ok"}"#,
            r#"{"status":"healthy","version":"1.2.0"}"#,
            r#"{"status":"UP"}"#,
        ] {
            let health: HealthStatus = serde_json::from_str(body).unwrap();
            assert!(health.is_ready(), "{body} should be ready");
        }
    }

    #[test]
    fn test_not_ready_status_keeps_details() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status":"starting","db":"connecting"}"#).unwrap();
        assert!(!health.is_ready());
        assert_eq!(health.details["db"], "connecting");
    }

    #[test]
    fn test_missing_status_is_an_error() {
        assert!(serde_json::from_str::<HealthStatus>(r#"{"state":"ok"}"#).is_err());
    }
}

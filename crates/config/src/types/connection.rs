//! Connection and run configuration types.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, retries, endpoint paths).
//! - Define run settings (batch deadline, readiness polling).
//! - Define the main `Config` structure combining connection, auth and run settings.
//!
//! Does NOT handle:
//! - Configuration loading from env/CLI (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - Default values come from `constants`, not magic numbers.
//! - `base_url` never carries a trailing slash once built by the loader.

use std::time::Duration;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_HEALTH_PATH, DEFAULT_LOGIN_PATH, DEFAULT_MAX_RETRIES,
    DEFAULT_READY_POLL_INTERVAL_SECS, DEFAULT_READY_TIMEOUT_SECS, DEFAULT_RETRY_BACKOFF_MS,
    DEFAULT_RUN_DEADLINE_SECS, DEFAULT_TIMEOUT_SECS,
};
use crate::types::auth::{AuthStrategy, LoginEncoding};

/// Connection configuration for the service under test.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the service (e.g., http://localhost:8000)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after a transport failure; HTTP error statuses are never retried
    pub max_retries: usize,
    /// Fixed delay between retries
    pub retry_backoff: Duration,
    /// Path of the login endpoint, joined onto `base_url`
    pub login_path: String,
    /// Body encoding of the login request
    pub login_encoding: LoginEncoding,
    /// Path of the health endpoint used by the readiness wait
    pub health_path: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            login_encoding: LoginEncoding::default(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
        }
    }
}

/// Settings that bound a whole run rather than a single request.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Overall deadline for the probe batch
    pub deadline: Duration,
    /// Interval between readiness polls
    pub ready_poll_interval: Duration,
    /// How long to wait for the service to report ready
    pub ready_timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(DEFAULT_RUN_DEADLINE_SECS),
            ready_poll_interval: Duration::from_secs(DEFAULT_READY_POLL_INTERVAL_SECS),
            ready_timeout: Duration::from_secs(DEFAULT_READY_TIMEOUT_SECS),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication strategy
    pub auth: AuthStrategy,
    /// Run-level settings
    pub run: RunConfig,
}

impl Config {
    /// Create a config for `base_url` with default connection and run settings.
    ///
    /// The URL is used as given; the loader is responsible for validation.
    pub fn new(base_url: impl Into<String>, auth: AuthStrategy) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url: base_url.into().trim_end_matches('/').to_string(),
                ..ConnectionConfig::default()
            },
            auth,
            run: RunConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let connection = ConnectionConfig::default();
        assert_eq!(connection.base_url, "http://localhost:8000");
        assert_eq!(connection.timeout, Duration::from_secs(10));
        assert_eq!(connection.max_retries, 2);
        assert_eq!(connection.retry_backoff, Duration::from_secs(1));
        assert_eq!(connection.login_path, "/api/v1/auth/login");
        assert_eq!(connection.login_encoding, LoginEncoding::Form);

        let run = RunConfig::default();
        assert_eq!(run.ready_poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = Config::new("http://svc:8000/", AuthStrategy::Anonymous);
        assert_eq!(config.connection.base_url, "http://svc:8000");
    }
}

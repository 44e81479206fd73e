//! Client builder for constructing [`ProbeClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating and normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual requests (handled by [`ProbeClient`] methods and [`crate::endpoints`])
//! - Loading settings from env or flags (handled by `probe_config::ConfigLoader`)
//!
//! # Invariants
//! - `base_url` is required and must be an absolute http(s) URL
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning
//! - Redirects are never followed, so a result carries the endpoint's own status

use std::time::Duration;

use probe_config::constants::{DEFAULT_HEALTH_PATH, DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT_SECS};
use probe_config::{AuthStrategy, Config, LoginEncoding};

use crate::auth::SessionManager;
use crate::client::ProbeClient;
use crate::endpoints::RetryPolicy;
use crate::error::{ClientError, Result};

const USER_AGENT: &str = concat!("smoke-probe/", env!("CARGO_PKG_VERSION"));

/// Builder for creating a new [`ProbeClient`].
///
/// Every option has a default except `base_url`. Without an auth strategy
/// the client is anonymous.
pub struct ProbeClientBuilder {
    base_url: Option<String>,
    auth_strategy: AuthStrategy,
    skip_verify: bool,
    timeout: Duration,
    retry: RetryPolicy,
    login_path: String,
    login_encoding: LoginEncoding,
    health_path: String,
}

impl Default for ProbeClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: AuthStrategy::Anonymous,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            login_encoding: LoginEncoding::default(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
        }
    }
}

impl ProbeClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the service, e.g. `http://localhost:8000`.
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = strategy;
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against test environments with self-signed certificates.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the per-request timeout. Default is 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the transport retry policy. Default is 2 retries, 1 second apart.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn login_path(mut self, path: String) -> Self {
        self.login_path = path;
        self
    }

    pub fn login_encoding(mut self, encoding: LoginEncoding) -> Self {
        self.login_encoding = encoding;
        self
    }

    pub fn health_path(mut self, path: String) -> Self {
        self.health_path = path;
        self
    }

    /// Create a client builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        let connection = &config.connection;
        self.base_url = Some(connection.base_url.clone());
        self.auth_strategy = config.auth.clone();
        self.skip_verify = connection.skip_verify;
        self.timeout = connection.timeout;
        self.retry = RetryPolicy::from(connection);
        self.login_path = connection.login_path.clone();
        self.login_encoding = connection.login_encoding;
        self.health_path = connection.health_path.clone();
        self
    }

    /// Build the [`ProbeClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or not http(s).
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<ProbeClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = normalize_base_url(&base_url)?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none());

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(ProbeClient {
            http,
            base_url,
            session: SessionManager::new(self.auth_strategy),
            retry: self.retry,
            login_path: ensure_leading_slash(&self.login_path),
            login_encoding: self.login_encoding,
            health_path: ensure_leading_slash(&self.health_path),
        })
    }
}

/// Require an absolute http(s) URL and strip trailing slashes.
///
/// - `"http://localhost:8000/"` -> `"http://localhost:8000"`
/// - `"https://example.com//"` -> `"https://example.com"`
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed =
        url::Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "{trimmed}: scheme must be http or https"
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

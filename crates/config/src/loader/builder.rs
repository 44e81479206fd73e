//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Build and validate the final `Config` from loaded values.
//! - Decide the authentication strategy from whichever secrets were supplied.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables when applied after `from_env()`.
//! - A bearer token takes precedence over a username/password pair.
//! - No credentials at all yields `AuthStrategy::Anonymous`; there are no built-in passwords.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_HEALTH_PATH, DEFAULT_LOGIN_PATH, DEFAULT_MAX_RETRIES,
    DEFAULT_READY_POLL_INTERVAL_SECS, DEFAULT_READY_TIMEOUT_SECS, DEFAULT_RETRY_BACKOFF_MS,
    DEFAULT_RUN_DEADLINE_SECS, DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES, MAX_RETRY_BACKOFF_MS,
    MAX_RUN_DEADLINE_SECS, MAX_TIMEOUT_SECS,
};
use crate::types::{AuthStrategy, Config, ConnectionConfig, LoginEncoding, RunConfig, SecureValue};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecureValue>,
    token: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    retry_backoff: Option<Duration>,
    login_path: Option<String>,
    login_encoding: Option<LoginEncoding>,
    health_path: Option<String>,
    deadline: Option<Duration>,
    ready_poll_interval: Option<Duration>,
    ready_timeout: Option<Duration>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the login username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the login password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecureValue::Plain(SecretString::new(password.into())));
        self
    }

    /// Read the login password from the system keyring under `account`.
    pub fn with_password_keyring_account(mut self, account: String) -> Self {
        self.password = Some(SecureValue::Keyring {
            keyring_account: account,
        });
        self
    }

    /// Use a pre-issued bearer token instead of logging in.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of transport retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the fixed delay between transport retries.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    /// Set the login endpoint path.
    pub fn with_login_path(mut self, path: String) -> Self {
        self.login_path = Some(path);
        self
    }

    /// Set the login body encoding.
    pub fn with_login_encoding(mut self, encoding: LoginEncoding) -> Self {
        self.login_encoding = Some(encoding);
        self
    }

    /// Set the health endpoint path.
    pub fn with_health_path(mut self, path: String) -> Self {
        self.health_path = Some(path);
        self
    }

    /// Set the overall deadline of a probe batch.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the interval between readiness polls.
    pub fn with_ready_poll_interval(mut self, interval: Duration) -> Self {
        self.ready_poll_interval = Some(interval);
        self
    }

    /// Set how long the readiness wait may take.
    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = Some(timeout);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url =
            validate_and_normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            retry_backoff: self
                .retry_backoff
                .unwrap_or(Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS)),
            login_path: normalize_path(
                "login_path",
                self.login_path.as_deref().unwrap_or(DEFAULT_LOGIN_PATH),
            )?,
            login_encoding: self.login_encoding.unwrap_or_default(),
            health_path: normalize_path(
                "health_path",
                self.health_path.as_deref().unwrap_or(DEFAULT_HEALTH_PATH),
            )?,
        };

        let run = RunConfig {
            deadline: self
                .deadline
                .unwrap_or(Duration::from_secs(DEFAULT_RUN_DEADLINE_SECS)),
            ready_poll_interval: self
                .ready_poll_interval
                .unwrap_or(Duration::from_secs(DEFAULT_READY_POLL_INTERVAL_SECS)),
            ready_timeout: self
                .ready_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_READY_TIMEOUT_SECS)),
        };

        Self::validate_connection(&connection)?;
        Self::validate_run(&run, &connection)?;

        let auth = resolve_auth(self.token, self.username, self.password)?;
        if connection.skip_verify && connection.base_url.starts_with("http://") {
            tracing::warn!("skip_verify has no effect on a plain http:// base URL");
        }

        Ok(Config {
            connection,
            auth,
            run,
        })
    }

    /// Validates request-level bounds.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();
        if connection.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }

        if connection.retry_backoff.as_millis() > u128::from(MAX_RETRY_BACKOFF_MS) {
            return Err(ConfigError::InvalidRetryBackoff {
                message: format!(
                    "backoff exceeds maximum allowed value of {} ms",
                    MAX_RETRY_BACKOFF_MS
                ),
            });
        }

        Ok(())
    }

    /// Validates run-level bounds against the request timeout.
    fn validate_run(run: &RunConfig, connection: &ConnectionConfig) -> Result<(), ConfigError> {
        if run.deadline.as_secs() > MAX_RUN_DEADLINE_SECS {
            return Err(ConfigError::InvalidDeadline {
                message: format!(
                    "deadline exceeds maximum allowed value of {} seconds",
                    MAX_RUN_DEADLINE_SECS
                ),
            });
        }
        if run.deadline < connection.timeout {
            return Err(ConfigError::InvalidDeadline {
                message: format!(
                    "deadline ({}s) must not be shorter than the request timeout ({}s)",
                    run.deadline.as_secs(),
                    connection.timeout.as_secs()
                ),
            });
        }

        if run.ready_poll_interval.is_zero() {
            return Err(ConfigError::InvalidReadiness {
                message: "poll interval must be greater than 0 seconds".to_string(),
            });
        }
        if run.ready_timeout.is_zero() {
            return Err(ConfigError::InvalidReadiness {
                message: "ready timeout must be greater than 0 seconds".to_string(),
            });
        }

        Ok(())
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecureValue>) {
        self.password = password;
    }

    pub(crate) fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_retry_backoff(&mut self, backoff: Option<Duration>) {
        self.retry_backoff = backoff;
    }

    pub(crate) fn set_login_path(&mut self, path: Option<String>) {
        self.login_path = path;
    }

    pub(crate) fn set_login_encoding(&mut self, encoding: Option<LoginEncoding>) {
        self.login_encoding = encoding;
    }

    pub(crate) fn set_health_path(&mut self, path: Option<String>) {
        self.health_path = path;
    }

    pub(crate) fn set_deadline(&mut self, deadline: Option<Duration>) {
        self.deadline = deadline;
    }

    pub(crate) fn set_ready_poll_interval(&mut self, interval: Option<Duration>) {
        self.ready_poll_interval = interval;
    }

    pub(crate) fn set_ready_timeout(&mut self, timeout: Option<Duration>) {
        self.ready_timeout = timeout;
    }
}

/// Pick the auth strategy from the supplied secrets.
fn resolve_auth(
    token: Option<SecretString>,
    username: Option<String>,
    password: Option<SecureValue>,
) -> Result<AuthStrategy, ConfigError> {
    if let Some(token) = token {
        if token.expose_secret().trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "token".into(),
                message: "must not be empty".into(),
            });
        }
        return Ok(AuthStrategy::BearerToken { token });
    }

    match (username, password) {
        (Some(username), Some(password)) => {
            let username = username.trim().to_string();
            if username.is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: "username".into(),
                    message: "must not be empty".into(),
                });
            }
            let password = password.resolve()?;
            if password.expose_secret().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: "password".into(),
                    message: "must not be empty".into(),
                });
            }
            Ok(AuthStrategy::Credentials { username, password })
        }
        (Some(_), None) => Err(ConfigError::IncompleteCredentials {
            missing: "password",
            present: "username",
        }),
        (None, Some(_)) => Err(ConfigError::IncompleteCredentials {
            missing: "username",
            present: "password",
        }),
        (None, None) => Ok(AuthStrategy::Anonymous),
    }
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Treat blank/whitespace-only as missing (returns Err(ConfigError::MissingBaseUrl))
/// - Parse as an absolute URL
/// - Require scheme is http or https
/// - Require host is present
/// - Normalize by stripping trailing slash
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. http://localhost:8000): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!(
                "scheme must be http or https (e.g. http://localhost:8000), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. http://localhost:8000)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Ensure an endpoint path is non-empty and starts with `/`.
fn normalize_path(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must not be empty".into(),
        });
    }
    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_prepends_slash() {
        assert_eq!(normalize_path("p", "health").unwrap(), "/health");
        assert_eq!(normalize_path("p", " /health ").unwrap(), "/health");
        assert!(normalize_path("p", "  ").is_err());
    }

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            validate_and_normalize_base_url(" http://localhost:8000/ ").unwrap(),
            "http://localhost:8000"
        );
        assert!(matches!(
            validate_and_normalize_base_url(""),
            Err(ConfigError::MissingBaseUrl)
        ));
        assert!(matches!(
            validate_and_normalize_base_url("ftp://localhost"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            validate_and_normalize_base_url("localhost:8000"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}

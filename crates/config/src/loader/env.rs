//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse environment variables for the smoke run.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid values return ConfigError::InvalidValue naming the variable.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::MAX_MAX_RETRIES;
use crate::types::{LoginEncoding, SecureValue};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an environment variable into `T`, naming the variable on failure.
fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(username) = env_var_or_none("IRIS_USERNAME") {
        loader.set_username(Some(username));
    }
    // A literal password wins over a keyring reference.
    if let Some(password) = env_var_or_none("IRIS_PASSWORD") {
        loader.set_password(Some(SecureValue::Plain(SecretString::new(password.into()))));
    } else if let Some(account) = env_var_or_none("IRIS_PASSWORD_KEYRING_ACCOUNT") {
        loader.set_password(Some(SecureValue::Keyring {
            keyring_account: account,
        }));
    }
    if let Some(token) = env_var_or_none("IRIS_TOKEN") {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = parse_env::<bool>("PROBE_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("PROBE_TIMEOUT", "must be a number of seconds")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(value) =
        parse_env::<usize>("PROBE_MAX_RETRIES", "must be a non-negative integer")?
    {
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.set_max_retries(Some(value));
    }
    if let Some(ms) = parse_env::<u64>("PROBE_RETRY_BACKOFF_MS", "must be a number of milliseconds")? {
        loader.set_retry_backoff(Some(Duration::from_millis(ms)));
    }
    if let Some(secs) = parse_env::<u64>("PROBE_DEADLINE", "must be a number of seconds")? {
        loader.set_deadline(Some(Duration::from_secs(secs)));
    }
    if let Some(path) = env_var_or_none("PROBE_LOGIN_PATH") {
        loader.set_login_path(Some(path));
    }
    if let Some(encoding) =
        parse_env::<LoginEncoding>("PROBE_LOGIN_ENCODING", "must be 'form' or 'json'")?
    {
        loader.set_login_encoding(Some(encoding));
    }
    if let Some(path) = env_var_or_none("PROBE_HEALTH_PATH") {
        loader.set_health_path(Some(path));
    }
    if let Some(secs) = parse_env::<u64>("PROBE_READY_INTERVAL", "must be a number of seconds")? {
        loader.set_ready_poll_interval(Some(Duration::from_secs(secs)));
    }
    if let Some(secs) = parse_env::<u64>("PROBE_READY_TIMEOUT", "must be a number of seconds")? {
        loader.set_ready_timeout(Some(Duration::from_secs(secs)));
    }

    Ok(())
}

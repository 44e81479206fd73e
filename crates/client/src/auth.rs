//! Authentication tokens and session state.
//!
//! Responsibilities:
//! - Hold the bearer token issued by the login endpoint (`AuthToken`).
//! - Track which token, if any, should be attached to probe requests (`SessionManager`).
//!
//! Does NOT handle:
//! - The login HTTP exchange (see `endpoints::login`).
//! - Token refresh; a run logs in at most once per `login()` call.
//!
//! Invariants:
//! - Token values are `SecretString` and never appear in `Debug` output.
//! - The session token is read-only once the probe batch starts.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use probe_config::AuthStrategy;
use secrecy::{ExposeSecret, SecretString};

/// Token issued by the login endpoint.
#[derive(Debug, Clone)]
pub struct AuthToken {
    access_token: SecretString,
    token_type: String,
    expires_in: Option<u64>,
    issued_at: DateTime<Utc>,
}

impl AuthToken {
    /// Wrap a freshly issued token. An empty `token_type` falls back to `bearer`.
    pub fn new(access_token: String, token_type: Option<String>, expires_in: Option<u64>) -> Self {
        let token_type = token_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "bearer".to_string());
        Self {
            access_token: SecretString::new(access_token.into()),
            token_type,
            expires_in,
            issued_at: Utc::now(),
        }
    }

    /// The raw token value. Callers must not log it.
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Lifetime in seconds as reported by the server.
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Absolute expiry, when the server reported a lifetime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .map(|secs| self.issued_at + ChronoDuration::seconds(secs))
    }

    /// Value for the `Authorization` header.
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }

    /// Token with everything but the first and last four characters hidden.
    pub fn masked(&self) -> String {
        mask_secret(self.access_token.expose_secret())
    }
}

/// Mask a secret for display: short values are fully hidden.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Tracks the credential strategy and the token attached to requests.
#[derive(Debug)]
pub struct SessionManager {
    strategy: AuthStrategy,
    token: Option<AuthToken>,
}

impl SessionManager {
    /// Create a new session manager with the given auth strategy.
    pub fn new(strategy: AuthStrategy) -> Self {
        Self {
            strategy,
            token: None,
        }
    }

    pub fn strategy(&self) -> &AuthStrategy {
        &self.strategy
    }

    /// Whether a login request is needed before probing.
    pub fn requires_login(&self) -> bool {
        matches!(self.strategy, AuthStrategy::Credentials { .. })
    }

    /// The bearer token to attach to requests, if any.
    ///
    /// For a pre-issued token this is the configured value; for credential
    /// login it is the token from the last successful login.
    pub fn bearer_token(&self) -> Option<&str> {
        match &self.strategy {
            AuthStrategy::BearerToken { token } => Some(token.expose_secret()),
            AuthStrategy::Credentials { .. } => self.token.as_ref().map(AuthToken::access_token),
            AuthStrategy::Anonymous => None,
        }
    }

    /// Store a token received from the login endpoint.
    pub fn set_token(&mut self, token: AuthToken) {
        self.token = Some(token);
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}

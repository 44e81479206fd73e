//! Authentication types for smoke-run configuration.
//!
//! Responsibilities:
//! - Define authentication strategies (credential login, pre-issued bearer token, anonymous).
//! - Provide secure value storage (plain text or keyring) for the login password.
//! - Define the wire encoding used by the login request.
//!
//! Does NOT handle:
//! - The login request itself or token parsing (see client crate).
//! - Keyring entry creation/management (only retrieval).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - `KEYRING_SERVICE` is the canonical service name for all keyring operations.

use secrecy::SecretString;
use std::fmt;
use std::str::FromStr;

/// Strategy for authenticating the probe batch.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password exchanged for a bearer token at the login endpoint.
    Credentials {
        username: String,
        password: SecretString,
    },
    /// A bearer token issued out of band; no login request is made.
    BearerToken { token: SecretString },
    /// No credentials configured. Probes run without an `Authorization` header.
    Anonymous,
}

impl AuthStrategy {
    /// Convenience constructor for credential login.
    pub fn credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Credentials {
            username: username.into(),
            password: SecretString::new(password.into().into()),
        }
    }

    /// Convenience constructor for a pre-issued bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken {
            token: SecretString::new(token.into().into()),
        }
    }

    /// Short label used in logs; never includes secret material.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Credentials { .. } => "credentials",
            Self::BearerToken { .. } => "bearer-token",
            Self::Anonymous => "anonymous",
        }
    }
}

/// Body encoding of the login request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginEncoding {
    /// `application/x-www-form-urlencoded` with `username` and `password` fields.
    #[default]
    Form,
    /// `application/json` object with `username` and `password` keys.
    Json,
}

impl fmt::Display for LoginEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Form => f.write_str("form"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for LoginEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "form" => Ok(Self::Form),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'form' or 'json', got '{other}'")),
        }
    }
}

/// Service name used for keyring storage.
pub const KEYRING_SERVICE: &str = "smoke-probe";

/// A value that can be stored either in plain text or in the system keyring.
#[derive(Debug, Clone)]
pub enum SecureValue {
    /// Value stored in the system keyring.
    Keyring {
        /// The account name in the keyring.
        keyring_account: String,
    },
    /// Value held in memory (as a SecretString).
    Plain(SecretString),
}

impl SecureValue {
    /// Resolve the secure value to a SecretString.
    ///
    /// If the value is stored in the keyring, it will be fetched.
    pub fn resolve(&self) -> Result<SecretString, keyring::Error> {
        match self {
            Self::Plain(secret) => Ok(secret.clone()),
            Self::Keyring { keyring_account } => {
                let entry = keyring::Entry::new(KEYRING_SERVICE, keyring_account)?;
                let password = entry.get_password()?;
                Ok(SecretString::new(password.into()))
            }
        }
    }
}

//! Probe client and its operations.
//!
//! This module provides [`ProbeClient`], which owns the HTTP connection pool,
//! the session token and the retry policy shared by every request of a run.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Credential login and token handling
//! - `probe`: Single probe execution
//! - `health`: Health check and readiness wait
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Sequencing a batch under a deadline (see [`crate::runner`])
//!
//! # Invariants
//! - Probe execution takes `&self`; only login mutates the client.
//! - HTTP error statuses are never retried; transport failures use the configured policy.

pub mod builder;
mod health;
mod probe;
mod session;

use probe_config::LoginEncoding;

use crate::auth::SessionManager;
use crate::endpoints::RetryPolicy;

/// HTTP client for one smoke run against one base URL.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use probe_client::ProbeClient;
/// use probe_config::AuthStrategy;
///
/// let mut client = ProbeClient::builder()
///     .base_url("http://localhost:8000".to_string())
///     .auth_strategy(AuthStrategy::credentials("admin", "secret"))
///     .build()?;
/// let token = client.login().await?;
/// ```
#[derive(Debug)]
pub struct ProbeClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session: SessionManager,
    pub(crate) retry: RetryPolicy,
    pub(crate) login_path: String,
    pub(crate) login_encoding: LoginEncoding,
    pub(crate) health_path: String,
}

impl ProbeClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ProbeClientBuilder {
        builder::ProbeClientBuilder::new()
    }

    /// Get the base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}

//! Centralized constants for the smoke-probe workspace.
//!
//! Default values used across crates, kept here to avoid magic number
//! duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Base URL used when neither `--base-url` nor `BASE_URL` is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum allowed per-request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;

// =============================================================================
// Retry Defaults
// =============================================================================

/// Default number of retries after a transport failure.
pub const DEFAULT_MAX_RETRIES: usize = 2;

/// Upper bound for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

/// Default fixed delay between transport retries in milliseconds.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;

/// Upper bound for the retry backoff in milliseconds.
pub const MAX_RETRY_BACKOFF_MS: u64 = 60_000;

// =============================================================================
// Run Defaults
// =============================================================================

/// Default overall deadline for a probe batch in seconds.
pub const DEFAULT_RUN_DEADLINE_SECS: u64 = 300;

/// Upper bound for the run deadline in seconds (24 hours).
pub const MAX_RUN_DEADLINE_SECS: u64 = 86_400;

/// Default interval between readiness polls in seconds.
pub const DEFAULT_READY_POLL_INTERVAL_SECS: u64 = 5;

/// Default time to wait for the service to report ready, in seconds.
pub const DEFAULT_READY_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// Endpoint Defaults
// =============================================================================

/// Path of the token-issuing login endpoint.
pub const DEFAULT_LOGIN_PATH: &str = "/api/v1/auth/login";

/// Path of the liveness endpoint polled by the readiness wait.
pub const DEFAULT_HEALTH_PATH: &str = "/health";

// =============================================================================
// Reporting Defaults
// =============================================================================

/// Maximum number of characters of a response body kept in error details.
pub const DEFAULT_SNIPPET_CHARS: usize = 200;

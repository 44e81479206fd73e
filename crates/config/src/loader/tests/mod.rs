//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests that touch process env use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod env_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable `apply_env` reads, for building a clean environment.
pub const PROBE_ENV_VARS: [&str; 15] = [
    "BASE_URL",
    "IRIS_USERNAME",
    "IRIS_PASSWORD",
    "IRIS_PASSWORD_KEYRING_ACCOUNT",
    "IRIS_TOKEN",
    "PROBE_SKIP_VERIFY",
    "PROBE_TIMEOUT",
    "PROBE_MAX_RETRIES",
    "PROBE_RETRY_BACKOFF_MS",
    "PROBE_DEADLINE",
    "PROBE_LOGIN_PATH",
    "PROBE_LOGIN_ENCODING",
    "PROBE_HEALTH_PATH",
    "PROBE_READY_INTERVAL",
    "PROBE_READY_TIMEOUT",
];

/// Run `f` with all probe variables unset except the given overrides.
pub fn with_probe_env<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
    let vars: Vec<(&str, Option<&str>)> = PROBE_ENV_VARS
        .iter()
        .map(|key| {
            let value = overrides
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(vars, f);
}

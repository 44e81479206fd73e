//! Testing utilities for probe client tests.
//!
//! Fixture loading and proptest strategies for probe types.
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use probe_client::testing::{load_fixture, strategies};
//!
//! let login = load_fixture("auth/login_success.json");
//! proptest!(|(status in strategies::status_code())| { /* ... */ });
//! ```

use std::path::Path;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory (e.g., "auth/login_success.json")
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Proptest strategies for probe types.
pub mod strategies {
    use std::time::Duration;

    use proptest::prelude::*;

    use crate::models::{ExpectedStatus, HttpMethod, ProbeResult};

    /// Any observed status, including the transport-failure sentinel `0`.
    pub fn status_code() -> impl Strategy<Value = u16> {
        prop_oneof![
            1 => Just(0u16),
            8 => 100u16..=599,
        ]
    }

    pub fn expected_status() -> impl Strategy<Value = ExpectedStatus> {
        prop::collection::btree_set(100u16..=599, 1..5)
            .prop_map(|codes| ExpectedStatus::new(codes).expect("codes are in range"))
    }

    pub fn http_method() -> impl Strategy<Value = HttpMethod> {
        prop_oneof![
            Just(HttpMethod::Get),
            Just(HttpMethod::Post),
            Just(HttpMethod::Put),
            Just(HttpMethod::Delete),
            Just(HttpMethod::Patch),
            Just(HttpMethod::Head),
        ]
    }

    /// Results built the same way the executor builds them.
    pub fn probe_result() -> impl Strategy<Value = ProbeResult> {
        (
            "/[a-z0-9/]{0,24}",
            http_method(),
            expected_status(),
            status_code(),
            0u64..5_000,
        )
            .prop_map(|(endpoint, method, expected, status, ms)| {
                let elapsed = Duration::from_millis(ms);
                if status == 0 {
                    ProbeResult::transport_failure(
                        endpoint,
                        method,
                        expected,
                        "connection refused",
                        elapsed,
                    )
                } else {
                    ProbeResult::from_status(endpoint, method, expected, status, Some("body"), elapsed)
                }
            })
    }
}

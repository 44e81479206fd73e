//! Property-based tests for probe classification and summary arithmetic.

use proptest::prelude::*;

use probe_client::testing::strategies::{expected_status, probe_result, status_code};
use probe_client::{ProbeResult, RunReport, RunSummary};
use std::time::Duration;

proptest! {
    #[test]
    fn passed_iff_status_expected(result in probe_result()) {
        prop_assert_eq!(result.passed(), result.expected_status().contains(result.status_code()));
        prop_assert_eq!(result.passed(), result.error_detail().is_none());
    }

    #[test]
    fn transport_failure_never_passes(expected in expected_status()) {
        let result = ProbeResult::transport_failure(
            "/health",
            probe_client::HttpMethod::Get,
            expected,
            "connection refused",
            Duration::ZERO,
        );
        prop_assert!(!result.passed());
        prop_assert_eq!(result.status_code(), 0);
    }

    #[test]
    fn failure_detail_names_both_statuses(expected in expected_status(), status in status_code()) {
        prop_assume!(status != 0 && !expected.contains(status));
        let result = ProbeResult::from_status(
            "/x",
            probe_client::HttpMethod::Get,
            expected.clone(),
            status,
            None,
            Duration::ZERO,
        );
        let detail = result.error_detail().unwrap().to_string();
        let expected_prefix = format!("expected {}, got {}", expected, status);
        prop_assert!(detail.starts_with(&expected_prefix));
    }

    #[test]
    fn summary_counts_add_up(results in prop::collection::vec(probe_result(), 0..40)) {
        let summary = RunSummary::from_results(&results);
        prop_assert_eq!(summary.total, results.len());
        prop_assert_eq!(summary.passed + summary.failed, summary.total);
        prop_assert!((0.0..=100.0).contains(&summary.success_rate));
    }

    #[test]
    fn exit_outcome_matches_failures(results in prop::collection::vec(probe_result(), 0..20)) {
        let any_failed = results.iter().any(|r| !r.passed());
        let report = RunReport::new("http://localhost:8000", results, None);
        prop_assert_eq!(report.all_passed(), !any_failed);
    }
}

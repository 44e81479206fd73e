//! Human-readable text formatter.
//!
//! One `PASS`/`FAIL` line per probe in run order, a failure section with the
//! reason for each failed probe, then the summary line.

use anyhow::Result;
use probe_client::{HealthStatus, RunReport, RunSummary};

use super::common::{format_elapsed, format_status};
use super::{Formatter, LoginOutput};

/// Text formatter.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_report(&self, report: &RunReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("Smoke run against {}\n\n", report.base_url));

        if report.results.is_empty() {
            output.push_str("No probes were run.\n");
        }

        for result in &report.results {
            output.push_str(&format!(
                "{:<4} {:<6} {:<40} {:>3} (expected {}) {}\n",
                if result.passed() { "PASS" } else { "FAIL" },
                result.method().as_str(),
                result.endpoint(),
                format_status(result.status_code()),
                result.expected_status(),
                format_elapsed(result.elapsed()),
            ));
        }

        let failures: Vec<_> = report.failures().collect();
        if !failures.is_empty() {
            output.push_str("\nFailures:\n");
            for result in failures {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    result.method(),
                    result.endpoint(),
                    result.error_detail().unwrap_or("unexpected status")
                ));
            }
        }

        if let Some(reason) = &report.incomplete {
            output.push_str(&format!("\nRun incomplete: {}\n", reason));
        }

        output.push('\n');
        output.push_str(&summary_line(&report.summary));
        output.push('\n');

        Ok(output)
    }

    fn format_login(&self, login: &LoginOutput) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("Logged in to {} as {}\n", login.base_url, login.username));
        output.push_str(&format!("Token type: {}\n", login.token_type));
        output.push_str(&format!("Token: {}\n", login.token));
        match (login.expires_in, login.expires_at) {
            (Some(secs), Some(at)) => {
                output.push_str(&format!("Expires in: {}s (at {})\n", secs, at.to_rfc3339()));
            }
            (Some(secs), None) => output.push_str(&format!("Expires in: {}s\n", secs)),
            _ => output.push_str("Expires in: N/A\n"),
        }
        Ok(output)
    }

    fn format_health(&self, health: &HealthStatus) -> Result<String> {
        let mut output = format!("Status: {}\n", health.status);
        for (key, value) in &health.details {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            output.push_str(&format!("{}: {}\n", key, rendered));
        }
        Ok(output)
    }
}

/// `Total: 5, Passed: 4, Failed: 1, Success rate: 80.0%`
pub(crate) fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Total: {}, Passed: {}, Failed: {}, Success rate: {:.1}%",
        summary.total, summary.passed, summary.failed, summary.success_rate
    )
}

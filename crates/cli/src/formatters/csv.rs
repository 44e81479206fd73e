//! CSV formatter implementation.
//!
//! Responsibilities:
//! - One RFC 4180 row per probe with a fixed header, written with `csv::Writer`.
//!
//! Does NOT handle:
//! - The summary; CSV consumers derive it from the rows.

use anyhow::{Context, Result};
use probe_client::{HealthStatus, RunReport};

use super::{Formatter, LoginOutput};

/// Column order of report rows.
pub const REPORT_HEADER: [&str; 7] = [
    "endpoint",
    "method",
    "status_code",
    "expected_status",
    "passed",
    "elapsed_ms",
    "error_detail",
];

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_report(&self, report: &RunReport) -> Result<String> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());
        writer.write_record(REPORT_HEADER)?;

        for result in &report.results {
            writer.write_record([
                result.endpoint().to_string(),
                result.method().to_string(),
                result.status_code().to_string(),
                result.expected_status().to_string(),
                result.passed().to_string(),
                result.elapsed().as_millis().to_string(),
                result.error_detail().unwrap_or_default().to_string(),
            ])?;
        }

        finish(writer)
    }

    fn format_login(&self, login: &LoginOutput) -> Result<String> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());
        writer.write_record(["base_url", "username", "token_type", "token", "expires_in", "expires_at"])?;
        writer.write_record([
            login.base_url.clone(),
            login.username.clone(),
            login.token_type.clone(),
            login.token.clone(),
            login.expires_in.map(|s| s.to_string()).unwrap_or_default(),
            login.expires_at.map(|at| at.to_rfc3339()).unwrap_or_default(),
        ])?;
        finish(writer)
    }

    fn format_health(&self, health: &HealthStatus) -> Result<String> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());
        writer.write_record(["key", "value"])?;
        writer.write_record(["status", health.status.as_str()])?;
        for (key, value) in &health.details {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            writer.write_record([key.as_str(), rendered.as_str()])?;
        }
        finish(writer)
    }
}

fn finish(writer: ::csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

//! JSON formatter implementation.
//!
//! Pretty-printed JSON of the serde representations; the report keeps the
//! run order of `results`.

use anyhow::Result;
use probe_client::{HealthStatus, RunReport};

use super::{Formatter, LoginOutput};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_report(&self, report: &RunReport) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(report)?))
    }

    fn format_login(&self, login: &LoginOutput) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(login)?))
    }

    fn format_health(&self, health: &HealthStatus) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(health)?))
    }
}

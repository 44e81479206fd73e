//! Output formatters for run reports.
//!
//! Responsibilities:
//! - Provide the text, JSON and CSV renditions of a `RunReport`.
//! - Render login and health results for the `login` and `wait` commands.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings; see `output_result`).
//! - Exit codes (see `error` module).
//!
//! Invariants:
//! - Every format carries the same summary numbers: total, passed, failed and
//!   success rate.
//! - Secrets never reach a formatter; login output holds a masked token only.
//!
//! ## Empty-State Handling
//!
//! | Format | Empty run |
//! |--------|-----------|
//! | JSON | `"results": []` with a zeroed summary |
//! | CSV | Header row only |
//! | Text | `No probes were run.` plus the summary line |

use anyhow::Result;
use chrono::{DateTime, Utc};
use probe_client::{AuthToken, HealthStatus, RunReport};
use serde::Serialize;

mod common;
mod csv;
mod json;
mod text;

pub use self::common::{output_result, write_to_file};
pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: text, json, csv", s),
        }
    }
}

/// What the `login` command reports about the issued token.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutput {
    pub base_url: String,
    pub username: String,
    pub token_type: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl LoginOutput {
    pub fn new(base_url: &str, username: &str, token: &AuthToken) -> Self {
        Self {
            base_url: base_url.to_string(),
            username: username.to_string(),
            token_type: token.token_type().to_string(),
            token: token.masked(),
            expires_in: token.expires_in(),
            expires_at: token.expires_at(),
        }
    }
}

/// Formatter trait for the different output types.
pub trait Formatter {
    /// Format the per-probe results and the run summary.
    fn format_report(&self, report: &RunReport) -> Result<String>;

    /// Format the outcome of a standalone login.
    fn format_login(&self, login: &LoginOutput) -> Result<String>;

    /// Format a health endpoint response.
    fn format_health(&self, health: &HealthStatus) -> Result<String>;
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

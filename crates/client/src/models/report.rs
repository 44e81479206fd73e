//! Aggregated outcome of a probe batch.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::result::ProbeResult;

/// Counts over a batch of probe results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of passed probes in `[0, 100]`; 0 for an empty batch.
    pub success_rate: f64,
}

impl RunSummary {
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let success_rate = if total == 0 {
            0.0
        } else {
            (passed as f64 * 100.0) / total as f64
        };
        Self {
            total,
            passed,
            failed: total - passed,
            success_rate,
        }
    }
}

/// How a run ended, in order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    AllPassed,
    ProbesFailed,
    /// The batch stopped early (deadline); remaining probes never ran.
    Incomplete,
}

/// Everything the reporter needs: per-probe results plus the summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub base_url: String,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ProbeResult>,
    pub summary: RunSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete: Option<String>,
}

impl RunReport {
    pub fn new(
        base_url: impl Into<String>,
        results: Vec<ProbeResult>,
        incomplete: Option<String>,
    ) -> Self {
        let summary = RunSummary::from_results(&results);
        Self {
            base_url: base_url.into(),
            generated_at: Utc::now(),
            results,
            summary,
            incomplete,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.incomplete.is_some() {
            RunOutcome::Incomplete
        } else if self.summary.failed == 0 {
            RunOutcome::AllPassed
        } else {
            RunOutcome::ProbesFailed
        }
    }

    pub fn all_passed(&self) -> bool {
        self.outcome() == RunOutcome::AllPassed
    }
}

//! Progress indicators for smoke runs.
//!
//! Responsibilities:
//! - Show a probe counter while a plan runs and spinners for login/readiness waits.
//! - Draw ALL progress output on STDERR so the report on stdout stays clean
//!   for `--output json|csv` pipelines.
//! - Become no-ops when disabled by `--quiet`.
//!
//! Non-responsibilities:
//! - Printing results; stdout is reserved for the formatted report.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use probe_client::ProbeResult;
use std::time::Duration;

/// Counter over the probes of a plan (`[3/12] GET /health`).
pub(crate) struct RunProgress {
    pb: Option<ProgressBar>,
}

impl RunProgress {
    /// `enabled` should be `!quiet`. An empty plan draws nothing.
    pub(crate) fn new(enabled: bool, total: usize) -> Self {
        if !enabled || total == 0 {
            return Self { pb: None };
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}") {
            pb.set_style(style);
        }
        pb.set_message("starting");
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb: Some(pb) }
    }

    /// Advance by one finished probe.
    pub(crate) fn record(&self, result: &ProbeResult) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.inc(1);
        pb.set_message(format!("{} {}", result.method(), result.endpoint()));
        if !result.passed() {
            pb.println(format!(
                "FAIL {} {} ({})",
                result.method(),
                result.endpoint(),
                result.error_detail().unwrap_or("unexpected status")
            ));
        }
    }

    pub(crate) fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

impl Drop for RunProgress {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

/// An indefinite spinner for login and readiness waits.
///
/// Always draws to STDERR; no-op when disabled.
pub(crate) struct Spinner {
    label: String,
    pb: Option<ProgressBar>,
}

impl Spinner {
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();

        if !enabled {
            return Self { label, pb: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
            pb.set_style(style);
        }
        pb.set_message(label.clone());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            label,
            pb: Some(pb),
        }
    }

    /// Finish the spinner with a stable message (on STDERR).
    pub(crate) fn finish(&self) {
        let Some(pb) = &self.pb else {
            return;
        };

        pb.finish_with_message(format!("{} done", self.label));
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_client::{ExpectedStatus, HttpMethod};

    #[test]
    fn test_disabled_progress_is_noop() {
        let progress = RunProgress::new(false, 3);
        let result = ProbeResult::from_status(
            "/health",
            HttpMethod::Get,
            ExpectedStatus::default(),
            200,
            None,
            Duration::from_millis(5),
        );
        progress.record(&result);
        progress.finish();
        assert!(progress.pb.is_none());
    }

    #[test]
    fn test_empty_plan_draws_nothing() {
        assert!(RunProgress::new(true, 0).pb.is_none());
    }

    #[test]
    fn test_disabled_spinner_is_noop() {
        let spinner = Spinner::new(false, "Logging in");
        spinner.finish();
        assert!(spinner.pb.is_none());
    }
}

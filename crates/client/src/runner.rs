//! Sequential probe run under one deadline.
//!
//! Responsibilities:
//! - Authenticate once before any probe is issued.
//! - Execute the plan strictly in order, one probe at a time.
//! - Stop at the run deadline and record why the batch is incomplete.
//!
//! Does NOT handle:
//! - Rendering the report (the CLI formatters do that).
//! - Ctrl+C; the caller races the run against its own cancellation token.
//!
//! Invariants:
//! - A login failure aborts the run with `Err`; no report is produced.
//! - After login, no probe failure aborts the run. Only the deadline ends it early.

use std::time::Duration;

use probe_config::Config;
use tokio::time::{Instant, timeout_at};
use tracing::{Instrument, info, warn};

use crate::client::ProbeClient;
use crate::error::{ClientError, Result};
use crate::models::{ProbeRequest, ProbeResult, RunReport};

/// Drives one smoke run: login, then every probe in plan order.
#[derive(Debug)]
pub struct SmokeRunner {
    client: ProbeClient,
    deadline: Duration,
}

impl SmokeRunner {
    pub fn new(client: ProbeClient, deadline: Duration) -> Self {
        Self { client, deadline }
    }

    /// Build the client and the deadline from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ProbeClient::builder().from_config(config).build()?;
        Ok(Self::new(client, config.run.deadline))
    }

    pub fn client(&self) -> &ProbeClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut ProbeClient {
        &mut self.client
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run the plan and collect every result.
    pub async fn run(&mut self, plan: &[ProbeRequest]) -> Result<RunReport> {
        self.run_with(plan, |_| {}).await
    }

    /// Run the plan, calling `on_result` as soon as each probe finishes.
    ///
    /// # Errors
    ///
    /// Returns the login error when authentication fails, or
    /// [`ClientError::DeadlineExceeded`] when the deadline passes during login.
    pub async fn run_with<F>(&mut self, plan: &[ProbeRequest], mut on_result: F) -> Result<RunReport>
    where
        F: FnMut(&ProbeResult),
    {
        let span = tracing::info_span!(
            "smoke_run",
            base_url = %self.client.base_url(),
            probes = plan.len(),
        );
        let deadline = self.deadline;
        let deadline_at = Instant::now() + deadline;

        async move {
            match timeout_at(deadline_at, self.client.authenticate()).await {
                Ok(outcome) => outcome?,
                Err(_) => return Err(ClientError::DeadlineExceeded(deadline)),
            }

            let mut results = Vec::with_capacity(plan.len());
            let mut incomplete = None;

            for (index, request) in plan.iter().enumerate() {
                let started = Instant::now();
                let result = match timeout_at(deadline_at, self.client.execute(request)).await {
                    Ok(result) => result,
                    Err(_) => {
                        let skipped = plan.len() - index - 1;
                        warn!(
                            target = %request.target,
                            skipped,
                            "Run deadline exceeded"
                        );
                        incomplete = Some(format!(
                            "run deadline of {}s exceeded; {skipped} probe(s) not executed",
                            deadline.as_secs()
                        ));
                        ProbeResult::transport_failure(
                            request.target.clone(),
                            request.method,
                            request.expected.clone(),
                            "run deadline exceeded",
                            started.elapsed(),
                        )
                    }
                };

                on_result(&result);
                results.push(result);
                if incomplete.is_some() {
                    break;
                }
            }

            let report = RunReport::new(self.client.base_url(), results, incomplete);
            info!(
                total = report.summary.total,
                passed = report.summary.passed,
                failed = report.summary.failed,
                "Run finished"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }
}

//! Run command: log in once, then probe every endpoint of the plan in order.
//!
//! Responsibilities:
//! - Load the endpoints file, or fall back to a single health probe.
//! - Optionally wait for the service to report ready before logging in.
//! - Report results and turn the run outcome into an exit code.
//!
//! Does NOT handle:
//! - Retry and deadline semantics (see `probe_client::SmokeRunner`).

use anyhow::{Context, Result};
use probe_client::plan::load_plan;
use probe_client::{ProbeRequest, SmokeRunner};
use probe_config::Config;
use tracing::info;

use crate::args::RunArgs;
use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, emit_report};
use crate::error::ExitCode;
use crate::progress::{RunProgress, Spinner};

pub async fn run(
    config: Config,
    args: RunArgs,
    options: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<ExitCode> {
    let format = options.output_format()?;

    let plan = match &args.endpoints_file {
        Some(path) => load_plan(path)
            .with_context(|| format!("Invalid endpoints file {}", path.display()))?,
        None => default_plan(&config),
    };
    info!(probes = plan.len(), "Loaded probe plan");

    let mut runner = SmokeRunner::from_config(&config)?;

    if args.wait_ready {
        let spinner = Spinner::new(!options.quiet, "Waiting for service to become ready");
        cancel
            .run(
                runner
                    .client()
                    .wait_until_ready(config.run.ready_poll_interval, config.run.ready_timeout),
            )
            .await?
            .context("Service did not become ready")?;
        spinner.finish();
    }

    let progress = RunProgress::new(!options.quiet, plan.len());
    let report = cancel
        .run(runner.run_with(&plan, |result| progress.record(result)))
        .await?
        .context("Smoke run aborted before probing")?;
    progress.finish();

    info!(
        total = report.summary.total,
        passed = report.summary.passed,
        failed = report.summary.failed,
        "Smoke run complete"
    );

    emit_report(&report, format, options)
}

/// Probe used when no endpoints file is given: `GET <health path>` expecting 200.
pub(crate) fn default_plan(config: &Config) -> Vec<ProbeRequest> {
    vec![ProbeRequest::get(config.connection.health_path.clone())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_client::{ExpectedStatus, HttpMethod};
    use probe_config::AuthStrategy;

    #[test]
    fn test_default_plan_probes_health() {
        let mut config = Config::new("http://localhost:8000", AuthStrategy::Anonymous);
        config.connection.health_path = "/api/health".to_string();

        let plan = default_plan(&config);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].method, HttpMethod::Get);
        assert_eq!(plan[0].target, "/api/health");
        assert_eq!(plan[0].expected, ExpectedStatus::default());
    }
}

//! Wait command: poll the health endpoint until the service reports ready.

use std::time::Duration;

use anyhow::{Context, Result};
use probe_client::ProbeClient;
use probe_config::Config;

use crate::cancellation::CancellationToken;
use crate::commands::OutputOptions;
use crate::error::ExitCode;
use crate::formatters::{get_formatter, output_result};
use crate::progress::Spinner;

pub async fn run(
    config: Config,
    interval: Option<u64>,
    max_wait: Option<u64>,
    options: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<ExitCode> {
    let format = options.output_format()?;

    let interval = interval
        .map(Duration::from_secs)
        .unwrap_or(config.run.ready_poll_interval);
    let max_wait = max_wait
        .map(Duration::from_secs)
        .unwrap_or(config.run.ready_timeout);
    if interval.is_zero() || max_wait.is_zero() {
        anyhow::bail!("--interval and --max-wait must be greater than 0 seconds");
    }

    let client = ProbeClient::builder().from_config(&config).build()?;

    let spinner = Spinner::new(!options.quiet, "Waiting for service to become ready");
    let health = cancel
        .run(client.wait_until_ready(interval, max_wait))
        .await?
        .context("Service did not become ready")?;
    spinner.finish();

    let output = get_formatter(format).format_health(&health)?;
    output_result(&output, format, options.file.as_ref())?;

    Ok(ExitCode::Success)
}

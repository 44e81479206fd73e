//! Login command: exchange credentials for a token and show it masked.

use anyhow::{Context, Result};
use probe_client::{ClientError, ProbeClient};
use probe_config::{AuthStrategy, Config};

use crate::cancellation::CancellationToken;
use crate::commands::OutputOptions;
use crate::error::ExitCode;
use crate::formatters::{LoginOutput, get_formatter, output_result};
use crate::progress::Spinner;

pub async fn run(
    config: Config,
    options: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<ExitCode> {
    let format = options.output_format()?;

    let username = match &config.auth {
        AuthStrategy::Credentials { username, .. } => username.clone(),
        _ => anyhow::bail!(
            "login requires credentials: pass --username and --password (or set IRIS_USERNAME and IRIS_PASSWORD)"
        ),
    };

    let mut client = ProbeClient::builder().from_config(&config).build()?;
    let deadline = config.run.deadline;

    let spinner = Spinner::new(!options.quiet, "Logging in");
    let token = cancel
        .run(tokio::time::timeout(deadline, client.login()))
        .await?
        .map_err(|_| ClientError::DeadlineExceeded(deadline))
        .and_then(|login| login)
        .context("Login failed")?;
    spinner.finish();

    let login = LoginOutput::new(client.base_url(), &username, &token);
    let output = get_formatter(format).format_login(&login)?;
    output_result(&output, format, options.file.as_ref())?;

    Ok(ExitCode::Success)
}

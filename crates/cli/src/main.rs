//! smoke-runner - authenticated HTTP smoke tests from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging (and trace export when an OTLP endpoint is set).
//! - Run the selected command and exit with its structured exit code.
//!
//! Does NOT handle:
//! - Login, probing or retry logic (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap env defaults.
//! - Usage errors exit with 4, never clap's default 2 (reserved for auth failure).

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;
mod progress;

use args::{Cli, Commands};
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use config_context::{ConfigCommandContext, load_config};
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use probe_client::tracing::TracingConfig;
use probe_config::ConfigLoader;

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::UsageError.as_i32());
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too and are not failures.
            let code = if e.use_stderr() {
                ExitCode::UsageError
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let mut tracing_config = TracingConfig::new()
        .with_default_filter(cli.log_filter())
        .with_log_format(cli.log_format());
    if let Some(ref endpoint) = cli.otlp_endpoint {
        tracing_config = tracing_config.with_otlp_endpoint(endpoint);
    }
    let tracing_guard = match tracing_config.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {}", e);
            std::process::exit(ExitCode::UsageError.as_i32());
        }
    };

    let needs_real_config = !matches!(cli.command, Some(Commands::Completions { .. }));
    let config_context = if needs_real_config {
        match load_config(&cli) {
            Ok(config) => ConfigCommandContext::Real(Box::new(config)),
            Err(e) => {
                eprintln!("{:#}", e);
                tracing_guard.shutdown();
                std::process::exit(e.exit_code().as_i32());
            }
        }
    } else {
        ConfigCommandContext::Placeholder
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config_context, &cancel).await {
        Ok(code) => code,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    // Flush pending spans before exiting.
    tracing_guard.shutdown();

    std::process::exit(exit_code.as_i32());
}

//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command handlers.
//! - Extract the configuration each command needs.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `config_context`).
//!
//! Invariants:
//! - All commands receive the same cancellation token.
//! - No subcommand means `run` with the top-level run options.

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands::{self, OutputOptions};
use crate::config_context::ConfigCommandContext;
use crate::error::ExitCode;

/// Dispatch CLI commands to their respective handlers and return the exit code
/// the command's outcome maps to.
pub(crate) async fn run_command(
    mut cli: Cli,
    config: ConfigCommandContext,
    cancel_token: &CancellationToken,
) -> Result<ExitCode> {
    let options = OutputOptions::from_cli(&cli);

    match cli.command_or_default() {
        Commands::Run(args) => {
            let config = config.into_real_config()?;
            commands::run::run(config, args, &options, cancel_token).await
        }
        Commands::Login => {
            let config = config.into_real_config()?;
            commands::login::run(config, &options, cancel_token).await
        }
        Commands::Probe {
            method,
            target,
            expect,
            no_auth,
            json,
            form,
        } => {
            let config = config.into_real_config()?;
            let args = commands::probe::ProbeArgs {
                method,
                target,
                expect,
                no_auth,
                json,
                form,
            };
            commands::probe::run(config, args, &options, cancel_token).await
        }
        Commands::Wait { interval, max_wait } => {
            let config = config.into_real_config()?;
            commands::wait::run(config, interval, max_wait, &options, cancel_token).await
        }
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

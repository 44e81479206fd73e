//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Build the runner configuration from env vars and CLI overrides.
//! - Distinguish between real and placeholder configs so commands that never
//!   touch the network (completions) do not fail on connection settings.
//!
//! Does NOT handle:
//! - `.env` loading (done in `main()` before clap parses).
//! - CLI argument definitions (see `args` module).
//!
//! Invariants:
//! - CLI flags override environment variables, which override built-in defaults.
//! - Placeholder configs cannot be used for actual connections.

use std::time::Duration;

use anyhow::{Context, Result};
use probe_config::{Config, ConfigLoader};

use crate::args::Cli;

/// Context for command execution, distinguishing between real and placeholder configs.
pub(crate) enum ConfigCommandContext {
    /// A validated config built from environment and CLI args.
    Real(Box<Config>),
    /// Used by commands that need no connection details.
    Placeholder,
}

impl ConfigCommandContext {
    /// Extract the real config, failing if this is a placeholder.
    pub(crate) fn into_real_config(self) -> Result<Config> {
        match self {
            ConfigCommandContext::Real(config) => Ok(*config),
            ConfigCommandContext::Placeholder => {
                anyhow::bail!(
                    "Internal error: attempted to use placeholder config for an operation requiring real connection details"
                )
            }
        }
    }
}

/// Build the configuration for `cli`, applying flags over environment values.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new()
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(ref token) = cli.token {
        loader = loader.with_token(token.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if let Some(ms) = cli.retry_backoff_ms {
        loader = loader.with_retry_backoff(Duration::from_millis(ms));
    }
    if let Some(secs) = cli.deadline {
        loader = loader.with_deadline(Duration::from_secs(secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(encoding) = cli.login_encoding {
        loader = loader.with_login_encoding(encoding);
    }
    if let Some(ref path) = cli.login_path {
        loader = loader.with_login_path(path.clone());
    }
    if let Some(ref path) = cli.health_path {
        loader = loader.with_health_path(path.clone());
    }

    loader.build().context("Failed to build configuration")
}

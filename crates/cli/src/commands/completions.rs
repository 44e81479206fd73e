//! Shell completion generation command.
//!
//! Responsibilities:
//! - Generate shell completion scripts for bash, zsh, fish, powershell and elvish.
//!
//! Does NOT handle:
//! - Installing completions (redirect stdout to the shell's completion directory).

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

use crate::error::ExitCode;

/// Write completions for `shell` to stdout.
pub fn run(shell: Shell) -> Result<ExitCode> {
    let mut cmd = crate::args::Cli::command();
    generate(shell, &mut cmd, "smoke-runner", &mut io::stdout());
    Ok(ExitCode::Success)
}

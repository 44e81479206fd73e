//! CLI command implementations.

pub mod completions;
pub mod login;
pub mod probe;
pub mod run;
pub mod wait;

use std::path::PathBuf;

use anyhow::Result;
use probe_client::RunReport;

use crate::args::Cli;
use crate::error::ExitCode;
use crate::formatters::{OutputFormat, get_formatter, output_result};

/// Output flags shared by every command.
#[derive(Debug, Clone)]
pub(crate) struct OutputOptions {
    pub format: String,
    pub file: Option<PathBuf>,
    pub quiet: bool,
}

impl OutputOptions {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.output.clone(),
            file: cli.output_file.clone(),
            quiet: cli.quiet,
        }
    }

    /// Parse the requested format; commands call this before any network work.
    pub(crate) fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_str(&self.format)
    }
}

/// Render a finished run and map its outcome to the process exit code.
pub(crate) fn emit_report(
    report: &RunReport,
    format: OutputFormat,
    options: &OutputOptions,
) -> Result<ExitCode> {
    let output = get_formatter(format).format_report(report)?;
    output_result(&output, format, options.file.as_ref())?;
    Ok(ExitCode::from(report.outcome()))
}

//! CLI exit codes for scripting and CI gates.
//!
//! Responsibilities:
//! - Define the exit codes a pipeline uses to tell failed probes from an
//!   unreachable or misconfigured target.
//! - Map `ClientError` variants, config errors and plan errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit code 2 is reserved for authentication failure, so clap usage errors use 4.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use probe_client::plan::PlanError;
use probe_client::{ClientError, RunOutcome};
use probe_config::ConfigError;

use crate::cancellation::Cancelled;

/// Structured exit codes for smoke-runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every probe passed and the run completed.
    Success = 0,

    /// At least one probe returned an unexpected status or could not connect.
    ProbesFailed = 1,

    /// Login was rejected or returned no usable token.
    AuthenticationFailed = 2,

    /// A transport failure prevented the run from completing: login could not
    /// reach the server, the run deadline passed, or the readiness wait timed out.
    ConnectionError = 3,

    /// Bad flags, invalid configuration, an unreadable or invalid endpoints
    /// file, or a local I/O failure.
    UsageError = 4,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<RunOutcome> for ExitCode {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::AllPassed => ExitCode::Success,
            RunOutcome::ProbesFailed => ExitCode::ProbesFailed,
            RunOutcome::Incomplete => ExitCode::ConnectionError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) | ClientError::MalformedResponse { .. } => {
                ExitCode::AuthenticationFailed
            }

            ClientError::Transport { .. } | ClientError::DeadlineExceeded(_) => {
                ExitCode::ConnectionError
            }

            ClientError::UnexpectedStatus { .. } => ExitCode::ProbesFailed,

            ClientError::InvalidUrl(_) | ClientError::InvalidRequest(_) => ExitCode::UsageError,

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::UsageError
                }
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns `ExitCode::UsageError` when nothing in the chain is recognized.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.is::<Cancelled>() {
                return ExitCode::Interrupted;
            }
            if cause.is::<ConfigError>() || cause.is::<PlanError>() {
                return ExitCode::UsageError;
            }
        }

        ExitCode::UsageError
    }
}

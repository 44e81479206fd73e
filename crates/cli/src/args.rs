//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Bind global flags to their environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not validate configuration (see `config_context` module).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use probe_client::tracing::LogFormat;
use probe_client::{ExpectedStatus, HttpMethod};
use probe_config::LoginEncoding;

#[derive(Parser)]
#[command(name = "smoke-runner")]
#[command(about = "Authenticated HTTP smoke tests for a running service", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(
    after_help = "Examples:\n  smoke-runner --base-url http://localhost:8000 -u admin -p secret --endpoints-file smoke.txt\n  smoke-runner run --endpoints-file smoke.txt --wait-ready --output json\n  smoke-runner login\n  smoke-runner probe POST /api/v1/auth/login --expect 401 --no-auth --form 'username=admin&password=wrong'\n  smoke-runner wait --max-wait 60\n\nExit codes:\n  0  all probes passed\n  1  one or more probes failed\n  2  authentication failed\n  3  transport failure or deadline prevented completion\n  4  usage or configuration error\n"
)]
pub struct Cli {
    /// Base URL of the service (e.g., http://localhost:8000)
    #[arg(long, global = true, env = "BASE_URL")]
    pub base_url: Option<String>,

    /// Username for the login endpoint
    #[arg(short, long, global = true, env = "IRIS_USERNAME")]
    pub username: Option<String>,

    /// Password for the login endpoint
    #[arg(short, long, global = true, env = "IRIS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Pre-issued bearer token (skips login)
    #[arg(long, global = true, env = "IRIS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Retries after a transport failure (HTTP errors are never retried)
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// Fixed delay between transport retries in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub retry_backoff_ms: Option<u64>,

    /// Deadline for the whole run in seconds, login included
    #[arg(long, global = true, value_name = "SECONDS")]
    pub deadline: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Login request body encoding (form or json)
    #[arg(long, global = true, value_name = "ENCODING")]
    pub login_encoding: Option<LoginEncoding>,

    /// Path of the login endpoint
    #[arg(long, global = true, value_name = "PATH")]
    pub login_path: Option<String>,

    /// Path of the health endpoint
    #[arg(long, global = true, value_name = "PATH")]
    pub health_path: Option<String>,

    /// Output format (text, json, csv)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: String,

    /// Output file path (saves the report to a file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Suppress progress output (spinners / counters).
    ///
    /// Note: Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log line format on stderr (text or json)
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    pub log_format: String,

    /// OTLP endpoint for trace export (e.g., http://localhost:4317)
    #[arg(long, global = true, env = "PROBE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options of the default `run` command.
#[derive(Args, Clone, Debug, Default)]
pub struct RunArgs {
    /// File listing one probe per line: METHOD PATH EXPECTED[,EXPECTED...]
    #[arg(long, env = "PROBE_ENDPOINTS_FILE", value_name = "FILE")]
    pub endpoints_file: Option<PathBuf>,

    /// Wait for the health endpoint to report ready before logging in
    #[arg(long)]
    pub wait_ready: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in once, then run every probe of the endpoints file (default)
    Run(RunArgs),

    /// Log in and show the issued token (masked)
    Login,

    /// Run a single probe
    Probe {
        /// HTTP method (GET, POST, PUT, DELETE, PATCH, HEAD)
        method: HttpMethod,

        /// Path joined onto the base URL, or an absolute URL
        target: String,

        /// Acceptable status codes, comma-separated
        #[arg(short, long, default_value = "200")]
        expect: ExpectedStatus,

        /// Do not send the bearer token
        #[arg(long)]
        no_auth: bool,

        /// JSON request body
        #[arg(long, conflicts_with = "form")]
        json: Option<String>,

        /// Form-encoded request body (e.g., 'username=admin&password=x')
        #[arg(long)]
        form: Option<String>,
    },

    /// Poll the health endpoint until the service reports ready
    Wait {
        /// Seconds between polls
        #[arg(long, value_name = "SECONDS")]
        interval: Option<u64>,

        /// Give up after this many seconds
        #[arg(long, value_name = "SECONDS")]
        max_wait: Option<u64>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// The command to run; no subcommand means `run` with the top-level options.
    pub fn command_or_default(&mut self) -> Commands {
        self.command
            .take()
            .unwrap_or_else(|| Commands::Run(std::mem::take(&mut self.run)))
    }

    /// Default tracing filter for the `-v` count.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "warn,smoke_runner=info,probe_client=info,probe_config=info",
            _ => "info,smoke_runner=debug,probe_client=debug,probe_config=debug",
        }
    }

    pub fn log_format(&self) -> LogFormat {
        if self.log_format == "json" {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_run() {
        let mut cli =
            Cli::try_parse_from(["smoke-runner", "--endpoints-file", "smoke.txt", "--wait-ready"])
                .unwrap();
        match cli.command_or_default() {
            Commands::Run(args) => {
                assert_eq!(args.endpoints_file, Some(PathBuf::from("smoke.txt")));
                assert!(args.wait_ready);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_probe_arguments() {
        let mut cli = Cli::try_parse_from([
            "smoke-runner",
            "probe",
            "post",
            "/api/v1/auth/login",
            "--expect",
            "401,403",
            "--no-auth",
        ])
        .unwrap();
        match cli.command_or_default() {
            Commands::Probe {
                method,
                expect,
                no_auth,
                ..
            } => {
                assert_eq!(method, HttpMethod::Post);
                assert!(expect.contains(401) && expect.contains(403));
                assert!(no_auth);
            }
            _ => panic!("expected probe"),
        }
    }

    #[test]
    fn test_json_and_form_conflict() {
        let result = Cli::try_parse_from([
            "smoke-runner",
            "probe",
            "POST",
            "/x",
            "--json",
            "{}",
            "--form",
            "a=b",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "smoke-runner",
            "login",
            "--base-url",
            "http://localhost:9000",
            "--login-encoding",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.login_encoding, Some(LoginEncoding::Json));
    }

    #[test]
    fn test_verbosity_filters() {
        let cli = Cli::try_parse_from(["smoke-runner", "-vv", "login"]).unwrap();
        assert!(cli.log_filter().contains("probe_client=debug"));
        assert_eq!(cli.log_format(), LogFormat::Text);
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        assert!(Cli::try_parse_from(["smoke-runner", "--log-format", "xml"]).is_err());
        let cli = Cli::try_parse_from(["smoke-runner", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format(), LogFormat::Json);
    }
}

//! Probe command: run one ad-hoc probe with the same login and reporting as `run`.

use anyhow::{Context, Result};
use probe_client::{ExpectedStatus, HttpMethod, ProbeBody, ProbeRequest, SmokeRunner};
use probe_config::Config;

use crate::cancellation::CancellationToken;
use crate::commands::{OutputOptions, emit_report};
use crate::error::ExitCode;

/// Arguments of a single ad-hoc probe.
#[derive(Debug, Clone)]
pub struct ProbeArgs {
    pub method: HttpMethod,
    pub target: String,
    pub expect: ExpectedStatus,
    pub no_auth: bool,
    pub json: Option<String>,
    pub form: Option<String>,
}

pub async fn run(
    config: Config,
    args: ProbeArgs,
    options: &OutputOptions,
    cancel: &CancellationToken,
) -> Result<ExitCode> {
    let format = options.output_format()?;
    let request = build_request(args)?;

    let mut runner = SmokeRunner::from_config(&config)?;
    let report = cancel
        .run(runner.run(std::slice::from_ref(&request)))
        .await?
        .context("Probe aborted before it was sent")?;

    emit_report(&report, format, options)
}

fn build_request(args: ProbeArgs) -> Result<ProbeRequest> {
    if args.target.trim().is_empty() {
        anyhow::bail!("probe target must not be empty");
    }

    let mut request = ProbeRequest::new(args.method, args.target).expect(args.expect);

    if let Some(json) = args.json {
        serde_json::from_str::<serde_json::Value>(&json).context("--json is not valid JSON")?;
        request = request.with_body(ProbeBody::Json(json));
    } else if let Some(form) = args.form {
        request = request.with_body(ProbeBody::Form(form));
    }

    if args.no_auth {
        request = request.without_auth();
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProbeArgs {
        ProbeArgs {
            method: HttpMethod::Post,
            target: "/api/v1/items".to_string(),
            expect: "201".parse().unwrap(),
            no_auth: false,
            json: None,
            form: None,
        }
    }

    #[test]
    fn test_json_body_is_validated() {
        let err = build_request(ProbeArgs {
            json: Some("{not json".to_string()),
            ..args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("--json is not valid JSON"));

        let request = build_request(ProbeArgs {
            json: Some(r#"{"name":"widget"}"#.to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(
            request.body,
            Some(ProbeBody::Json(r#"{"name":"widget"}"#.to_string()))
        );
    }

    #[test]
    fn test_no_auth_and_form() {
        let request = build_request(ProbeArgs {
            no_auth: true,
            form: Some("username=admin&password=wrong".to_string()),
            ..args()
        })
        .unwrap();
        assert!(!request.authenticated);
        assert!(matches!(request.body, Some(ProbeBody::Form(_))));
        assert!(request.expected.contains(201));
    }

    #[test]
    fn test_empty_target_rejected() {
        assert!(
            build_request(ProbeArgs {
                target: "  ".to_string(),
                ..args()
            })
            .is_err()
        );
    }
}

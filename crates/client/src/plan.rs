//! Endpoints file parsing.
//!
//! A plan is a text file with one probe per line:
//!
//! ```text
//! # method  path                     expected   options
//! GET       /health                  200
//! POST      /api/v1/auth/login       401        noauth form=username=admin&password=wrong
//! GET       /api/v1/items            200,204
//! PUT       /api/v1/items/1          200        json={"name": "probe"}
//! ```
//!
//! Blank lines and lines whose first non-blank character is `#` are skipped.
//! `json=` and `form=` consume the rest of the line, so they must come last.
//!
//! # Invariants
//! - Probes are returned in file order.
//! - Every error names the 1-based line it came from.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{ExpectedStatus, HttpMethod, ProbeBody, ProbeRequest};

/// Errors raised while reading an endpoints file.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("line {line}: {message}")]
    Invalid { line: usize, message: String },

    #[error("Failed to read endpoints file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlanError {
    fn invalid(line: usize, message: impl Into<String>) -> Self {
        Self::Invalid {
            line,
            message: message.into(),
        }
    }
}

/// Read and parse an endpoints file.
pub fn load_plan(path: &Path) -> Result<Vec<ProbeRequest>, PlanError> {
    let content = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_plan(&content)
}

/// Parse plan text into probe requests. An empty plan is valid.
///
/// A leading UTF-8 byte-order mark is ignored.
pub fn parse_plan(content: &str) -> Result<Vec<ProbeRequest>, PlanError> {
    content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.trim();
            (!line.is_empty() && !line.starts_with('#')).then_some((index + 1, line))
        })
        .map(|(number, line)| parse_line(number, line))
        .collect()
}

fn parse_line(number: usize, line: &str) -> Result<ProbeRequest, PlanError> {
    let mut rest = line;

    let method = next_token(&mut rest)
        .ok_or_else(|| PlanError::invalid(number, "missing method"))?
        .parse::<HttpMethod>()
        .map_err(|e| PlanError::invalid(number, e))?;
    let target = next_token(&mut rest)
        .ok_or_else(|| PlanError::invalid(number, "missing path"))?;
    let expected = next_token(&mut rest)
        .ok_or_else(|| PlanError::invalid(number, "missing expected status"))?
        .parse::<ExpectedStatus>()
        .map_err(|e| PlanError::invalid(number, e))?;

    let mut request = ProbeRequest::new(method, target).expect(expected);

    while let Some(option) = next_token(&mut rest) {
        if option.eq_ignore_ascii_case("noauth") {
            request = request.without_auth();
        } else if let Some(first) = option.strip_prefix("json=") {
            let body = join_rest(first, rest);
            serde_json::from_str::<serde_json::Value>(&body)
                .map_err(|e| PlanError::invalid(number, format!("invalid json body: {e}")))?;
            return Ok(request.with_body(ProbeBody::Json(body)));
        } else if let Some(first) = option.strip_prefix("form=") {
            return Ok(request.with_body(ProbeBody::Form(join_rest(first, rest))));
        } else {
            return Err(PlanError::invalid(
                number,
                format!("unknown option '{option}' (expected noauth, json=... or form=...)"),
            ));
        }
    }

    Ok(request)
}

/// Split the next whitespace-delimited token off the front of `rest`.
fn next_token<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        *rest = trimmed;
        return None;
    }
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (token, tail) = trimmed.split_at(end);
    *rest = tail;
    Some(token)
}

fn join_rest(first: &str, rest: &str) -> String {
    format!("{first}{rest}").trim_end().to_string()
}

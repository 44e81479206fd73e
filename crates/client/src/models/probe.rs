//! Probe request types: method, target, expected statuses and optional body.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// HTTP methods a probe may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Patch => reqwest::Method::PATCH,
            Self::Head => reqwest::Method::HEAD,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "HEAD" => Ok(Self::Head),
            other => Err(format!("unsupported HTTP method '{other}'")),
        }
    }
}

/// Non-empty set of acceptable HTTP status codes.
///
/// Only codes in `100..=599` are accepted, so the transport-failure
/// sentinel `0` can never be a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExpectedStatus(BTreeSet<u16>);

impl ExpectedStatus {
    /// Build a set from status codes, rejecting empty sets and out-of-range codes.
    pub fn new(codes: impl IntoIterator<Item = u16>) -> Result<Self, String> {
        let codes: BTreeSet<u16> = codes.into_iter().collect();
        if codes.is_empty() {
            return Err("expected status set must not be empty".to_string());
        }
        if let Some(bad) = codes.iter().find(|c| !(100..=599).contains(*c)) {
            return Err(format!("status code {bad} is outside 100-599"));
        }
        Ok(Self(codes))
    }

    pub fn contains(&self, status: u16) -> bool {
        self.0.contains(&status)
    }

    pub fn codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ExpectedStatus {
    fn default() -> Self {
        Self(BTreeSet::from([200]))
    }
}

impl fmt::Display for ExpectedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for code in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{code}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for ExpectedStatus {
    type Err = String;

    /// Parses `200` or `200,201,204`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let codes = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<u16>()
                    .map_err(|_| format!("invalid status code '{part}'"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(codes)
    }
}

/// Pre-serialized request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeBody {
    /// Sent as `application/json`.
    Json(String),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(String),
    Raw { content_type: String, body: String },
}

impl ProbeBody {
    pub fn content_type(&self) -> &str {
        match self {
            Self::Json(_) => "application/json",
            Self::Form(_) => "application/x-www-form-urlencoded",
            Self::Raw { content_type, .. } => content_type,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            Self::Json(body) | Self::Form(body) => body,
            Self::Raw { body, .. } => body,
        }
    }
}

/// One request to issue and the statuses that count as a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub method: HttpMethod,
    /// Path joined onto the base URL, or an absolute `http(s)://` URL used as-is.
    pub target: String,
    pub expected: ExpectedStatus,
    pub body: Option<ProbeBody>,
    /// Extra static headers.
    pub headers: Vec<(String, String)>,
    /// Attach the session bearer token when one is available.
    pub authenticated: bool,
}

impl ProbeRequest {
    pub fn new(method: HttpMethod, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            expected: ExpectedStatus::default(),
            body: None,
            headers: Vec::new(),
            authenticated: true,
        }
    }

    pub fn get(target: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, target)
    }

    pub fn expect(mut self, expected: ExpectedStatus) -> Self {
        self.expected = expected;
        self
    }

    pub fn with_body(mut self, body: ProbeBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Send without the `Authorization` header even if a token is held.
    pub fn without_auth(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Resolve the target against `base_url` (which carries no trailing slash).
    pub fn resolve_url(&self, base_url: &str) -> String {
        let target = self.target.trim();
        if target.starts_with("http://") || target.starts_with("https://") {
            return target.to_string();
        }
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            target.trim_start_matches('/')
        )
    }
}

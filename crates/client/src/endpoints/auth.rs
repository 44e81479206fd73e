//! Login endpoint.

use probe_config::LoginEncoding;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::auth::AuthToken;
use crate::endpoints::request::{RetryPolicy, body_snippet, read_body, send_with_retry};
use crate::error::{ClientError, Result};

/// Exchange username and password for an access token.
///
/// Succeeds only on HTTP 200 with a JSON body carrying a non-empty
/// `access_token`. Each call issues a fresh request; nothing is cached.
pub async fn login(
    client: &Client,
    base_url: &str,
    login_path: &str,
    encoding: LoginEncoding,
    username: &str,
    password: &str,
    retry: RetryPolicy,
) -> Result<AuthToken> {
    debug!(username, %encoding, "Requesting access token");

    let url = format!("{}{}", base_url, login_path);
    let builder = client.post(&url).header(ACCEPT, "application/json");
    let builder = match encoding {
        LoginEncoding::Form => builder.form(&[("username", username), ("password", password)]),
        LoginEncoding::Json => builder.json(&serde_json::json!({
            "username": username,
            "password": password,
        })),
    };

    let response = send_with_retry(builder, &url, retry).await?;
    let status = response.status().as_u16();
    let body = read_body(response, &url).await?;

    if status != 200 {
        return Err(ClientError::AuthFailed(format!(
            "login returned HTTP {}: {}",
            status,
            body_snippet(&body)
        )));
    }

    let value: Value = serde_json::from_str(&body).map_err(|e| ClientError::MalformedResponse {
        url: url.clone(),
        message: format!("login response is not JSON: {e}"),
        snippet: body_snippet(&body),
    })?;

    parse_token(&value)
}

fn parse_token(value: &Value) -> Result<AuthToken> {
    let access_token = value
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| {
            ClientError::AuthFailed("login response did not contain an access_token".to_string())
        })?;

    let token_type = value
        .get("token_type")
        .and_then(Value::as_str)
        .map(str::to_string);

    let expires_in = value.get("expires_in").and_then(|v| {
        v.as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    });

    Ok(AuthToken::new(access_token.to_string(), token_type, expires_in))
}

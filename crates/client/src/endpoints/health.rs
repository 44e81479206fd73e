//! Health endpoint.

use reqwest::Client;
use reqwest::header::ACCEPT;

use crate::endpoints::request::{RetryPolicy, body_snippet, read_body, send_with_retry};
use crate::error::{ClientError, Result};
use crate::models::HealthStatus;

/// Fetch and parse the liveness endpoint.
///
/// Any status other than 200 is `UnexpectedStatus`; a 200 whose body is not
/// `{"status": ...}` JSON is `MalformedResponse`.
pub async fn get_health(
    client: &Client,
    base_url: &str,
    health_path: &str,
    retry: RetryPolicy,
) -> Result<HealthStatus> {
    let url = format!("{}{}", base_url, health_path);
    let builder = client.get(&url).header(ACCEPT, "application/json");

    let response = send_with_retry(builder, &url, retry).await?;
    let status = response.status().as_u16();
    let body = read_body(response, &url).await?;

    if status != 200 {
        return Err(ClientError::UnexpectedStatus {
            status,
            url,
            snippet: body_snippet(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::MalformedResponse {
        url,
        message: format!("health response is not status JSON: {e}"),
        snippet: body_snippet(&body),
    })
}

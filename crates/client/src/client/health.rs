//! Health check and readiness wait.
//!
//! The readiness wait polls the health endpoint on a fixed interval until it
//! reports ready or the timeout elapses. Each poll is a single attempt; the
//! interval itself acts as the retry loop.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::client::ProbeClient;
use crate::endpoints::{self, RetryPolicy};
use crate::error::{ClientError, Result};
use crate::models::HealthStatus;

impl ProbeClient {
    /// Fetch the health endpoint once, using the client's retry policy.
    pub async fn check_health(&self) -> Result<HealthStatus> {
        endpoints::get_health(&self.http, &self.base_url, &self.health_path, self.retry).await
    }

    /// Poll the health endpoint until it reports ready.
    ///
    /// Transport errors and non-ready answers both count as "not yet".
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::DeadlineExceeded`] when `timeout` elapses first.
    pub async fn wait_until_ready(
        &self,
        interval: Duration,
        timeout: Duration,
    ) -> Result<HealthStatus> {
        let deadline = Instant::now() + timeout;
        let mut polls = 0u32;

        loop {
            polls += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            let poll = endpoints::get_health(
                &self.http,
                &self.base_url,
                &self.health_path,
                RetryPolicy::none(),
            );

            match tokio::time::timeout(remaining, poll).await {
                Ok(Ok(health)) if health.is_ready() => {
                    info!(polls, status = %health.status, "Service is ready");
                    return Ok(health);
                }
                Ok(Ok(health)) => {
                    debug!(polls, status = %health.status, "Service not ready yet");
                }
                Ok(Err(e)) => {
                    debug!(polls, error = %e, "Health poll failed");
                }
                Err(_) => return Err(ClientError::DeadlineExceeded(timeout)),
            }

            if Instant::now() + interval > deadline {
                return Err(ClientError::DeadlineExceeded(timeout));
            }
            tokio::time::sleep(interval).await;
        }
    }
}

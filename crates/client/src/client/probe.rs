//! Single probe execution.

use tracing::Instrument;

use crate::client::ProbeClient;
use crate::endpoints;
use crate::models::{ProbeRequest, ProbeResult};

impl ProbeClient {
    /// Execute one probe against the base URL.
    ///
    /// Authenticated probes carry the session token when one is held. The
    /// call never fails: transport failures are reported in the returned
    /// [`ProbeResult`] with status 0, so callers can keep going through a batch.
    pub async fn execute(&self, request: &ProbeRequest) -> ProbeResult {
        let span = tracing::info_span!(
            "probe",
            method = %request.method,
            target = %request.target,
        );
        endpoints::send_probe(
            &self.http,
            &self.base_url,
            self.session.bearer_token(),
            request,
            self.retry,
        )
        .instrument(span)
        .await
    }
}

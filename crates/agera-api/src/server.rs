// Server-wide endpoints
//
// Total online count and the connectivity probe.

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::AgeraClient;
use crate::error::Error;
use crate::transport::PROBE_TIMEOUT;

impl AgeraClient {
    /// Get the total number of players online across the network.
    ///
    /// `GET /v1/core/online/total`
    pub async fn total_online(&self) -> Result<Value, Error> {
        let url = self.api_url(&["v1", "core", "online", "total"])?;
        debug!("fetching total online");
        self.get_json(url).await
    }

    /// Lightweight connectivity check.
    ///
    /// `GET /v1/test` -- `true` only for HTTP 200. Never errors: any
    /// failure to reach the API is reported as `false`.
    pub async fn test_connection(&self) -> bool {
        let url = match self.api_url(&["v1", "test"]) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot build probe URL");
                return false;
            }
        };
        debug!("GET {} (probe)", url);

        match self.http().get(url).timeout(PROBE_TIMEOUT).send().await {
            Ok(resp) => resp.status() == reqwest::StatusCode::OK,
            Err(e) => {
                debug!(error = %e, "connectivity probe failed");
                false
            }
        }
    }
}

// Staff endpoints
//
// Punishment tallies and the online staff roster.

use serde_json::Value;
use tracing::debug;

use crate::client::AgeraClient;
use crate::error::Error;

impl AgeraClient {
    /// Get punishment counters (total / active / weekly bans and mutes).
    ///
    /// `GET /v1/staff/stats`
    pub async fn staff_stats(&self) -> Result<Value, Error> {
        let url = self.api_url(&["v1", "staff", "stats"])?;
        debug!("fetching punishment stats");
        self.get_json(url).await
    }

    /// List staff members currently online.
    ///
    /// `GET /v1/staff/online`
    pub async fn staff_online(&self) -> Result<Value, Error> {
        let url = self.api_url(&["v1", "staff", "online"])?;
        debug!("fetching online staff");
        self.get_json(url).await
    }
}

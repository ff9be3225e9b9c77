// Player endpoints
//
// Per-player statistics and profile lookups.

use serde_json::Value;
use tracing::debug;

use crate::client::AgeraClient;
use crate::error::Error;

impl AgeraClient {
    /// Get a player's statistics for one game mode.
    ///
    /// `GET /v1/player/stats/{name}/{mode}`
    ///
    /// Returns loosely-typed JSON because the field set differs per mode
    /// and the flat mapping may be wrapped in a container key.
    pub async fn player_stats(&self, name: &str, mode: &str) -> Result<Value, Error> {
        let url = self.api_url(&["v1", "player", "stats", name, mode])?;
        debug!(name, mode, "fetching player stats");
        self.get_json(url).await
    }

    /// Get a player's profile (ranks, last login, current server, ...).
    ///
    /// `GET /v1/player/profile/{name}`
    pub async fn player_profile(&self, name: &str) -> Result<Value, Error> {
        let url = self.api_url(&["v1", "player", "profile", name])?;
        debug!(name, "fetching player profile");
        self.get_json(url).await
    }
}

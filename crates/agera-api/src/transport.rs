// Shared transport configuration for building reqwest::Client instances.
//
// The game API client and the skin client share timeout and user-agent
// settings through this module, avoiding duplicated builder logic.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Default request timeout for every endpoint except the connectivity probe.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for `GET /v1/test`.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub const USER_AGENT: &str = "AgeraPvP-Discord-Bot/1.0";

/// Header carrying the API key on every game API request.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// Sent as `X-Api-Key` when present.
    pub api_key: Option<SecretString>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.into(),
            api_key: None,
        }
    }
}

impl TransportConfig {
    pub fn with_api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    ///
    /// The API key, if any, is injected as a sensitive default header.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        if let Some(ref key) = self.api_key {
            let mut value = HeaderValue::from_str(key.expose_secret())
                .map_err(|e| Error::ClientBuild(format!("invalid API key header: {e}")))?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}

// Skin render service client
//
// Fetches full-body character renders used by the profile card. The
// service is best-effort: a missing skin is `Ok(None)`, not an error.

use bytes::Bytes;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Production base URL of the skin render service.
pub const DEFAULT_SKIN_URL: &str = "https://skin.agerapvp.club";

/// Requested render size in pixels.
pub const BODY_RENDER_SIZE: u32 = 1024;

/// HTTP client for `GET /v1/body/{nickname}/{size}`.
#[derive(Debug, Clone)]
pub struct SkinClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SkinClient {
    /// Create a skin client. The API key is never sent to this service.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = TransportConfig {
            api_key: None,
            ..transport.clone()
        };
        Ok(Self {
            http: config.build_client()?,
            base_url,
        })
    }

    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch the raw body render for `nickname`.
    ///
    /// Returns `Ok(None)` for any non-200 status.
    pub async fn fetch_body(&self, nickname: &str) -> Result<Option<Bytes>, Error> {
        let size = BODY_RENDER_SIZE.to_string();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v1", "body", nickname, size.as_str()]);
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        if resp.status() != reqwest::StatusCode::OK {
            debug!(status = %resp.status(), nickname, "no skin available");
            return Ok(None);
        }
        Ok(Some(resp.bytes().await?))
    }
}

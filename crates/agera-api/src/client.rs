// Game API HTTP client
//
// Wraps `reqwest::Client` with AgeraPvP-specific URL construction and
// `success`/`message` envelope checking. Endpoint groups (player, staff,
// server) are implemented as inherent methods in separate files to keep
// this module focused on transport mechanics.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Production base URL of the game API.
pub const DEFAULT_BASE_URL: &str = "http://api.agerapvp.club";

/// Fallback text when the API rejects a request without a message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Неизвестная ошибка";

/// Every payload may carry `success`/`message`, even with HTTP 200.
#[derive(Deserialize)]
struct Envelope {
    /// Present but falsy (`false`, `null`, `0`, `""`, empty) means rejected.
    #[serde(default, deserialize_with = "present")]
    success: Option<Value>,
    message: Option<Value>,
}

/// Keep an explicit `null` distinct from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// HTTP client for the AgeraPvP game API.
///
/// All endpoint methods return the parsed JSON body after the envelope has
/// been checked: a body with `"success": false` surfaces as
/// [`Error::Rejected`] so callers never render a logical failure.
#[derive(Debug, Clone)]
pub struct AgeraClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
}

impl AgeraClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout_secs: crate::transport::DEFAULT_TIMEOUT.as_secs(),
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    pub(crate) fn api_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and check the response envelope.
    pub(crate) async fn get_json(&self, url: Url) -> Result<Value, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.parse_envelope(resp).await
    }

    /// Map a reqwest failure, singling out timeouts.
    pub(crate) fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Check HTTP status, decode JSON, and reject `success: false` bodies.
    async fn parse_envelope(&self, resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        trace!(bytes = body.len(), "response body received");

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        check_envelope(value)
    }
}

/// Reject an object body whose `success` field is present and falsy.
fn check_envelope(value: Value) -> Result<Value, Error> {
    if !value.is_object() {
        return Ok(value);
    }
    let Ok(envelope) = Envelope::deserialize(&value) else {
        return Ok(value);
    };
    if envelope.success.as_ref().is_some_and(is_falsy) {
        return Err(Error::Rejected {
            message: envelope
                .message
                .as_ref()
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map_or_else(|| UNKNOWN_ERROR_MESSAGE.into(), String::from),
        });
    }
    Ok(value)
}

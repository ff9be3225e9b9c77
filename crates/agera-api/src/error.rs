use thiserror::Error;

/// Top-level error type for the `agera-api` crate.
///
/// Covers every failure mode of the game API and the skin service:
/// transport, HTTP status, logical rejection, and payload decoding.
/// `agera-cards` maps these into user-facing outcomes.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API requests: {0}")]
    InvalidBaseUrl(String),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Building the underlying HTTP client failed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// HTTP 200 with `"success": false` in the body.
    #[error("API rejected the request: {message}")]
    Rejected { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` when the API could not be reached at all
    /// (network failure, timeout, or an HTTP error status).
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::Status { .. }
        )
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Status { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The message supplied by the API for a logical rejection.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_count_as_unreachable() {
        let err = Error::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert!(err.is_unreachable());
        assert!(!err.is_not_found());
        assert_eq!(err.rejection_message(), None);
    }

    #[test]
    fn rejection_exposes_message() {
        let err = Error::Rejected {
            message: "Игрок не найден".into(),
        };
        assert!(!err.is_unreachable());
        assert_eq!(err.rejection_message(), Some("Игрок не найден"));
        assert_eq!(err.to_string(), "API rejected the request: Игрок не найден");
    }

    #[test]
    fn not_found_status() {
        let err = Error::Status {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());
    }
}

use thiserror::Error;

use crate::CardKind;

/// Failure while composing or encoding a card.
///
/// Never shown to chat users: the renderer facade logs it and reports a
/// missing image instead.
#[derive(Debug, Error)]
pub enum RenderError {
    /// PNG encoding (or background/skin decoding) failed.
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// The font file could not be read or parsed.
    #[error("Font error: {0}")]
    Font(String),

    /// Requested canvas has no pixels.
    #[error("Invalid canvas size {width}x{height}")]
    Canvas { width: u32, height: u32 },

    /// The payload cannot be drawn at all (e.g. a profile that is not an object).
    #[error("Unusable payload: {0}")]
    InvalidPayload(&'static str),

    /// A drawing routine panicked; the panic was contained.
    #[error("Renderer panicked: {0}")]
    Panicked(String),
}

/// Outcome of a fetch-and-render request that did not produce a card.
///
/// Maps one-to-one onto the replies a chat command sends.
#[derive(Debug, Error)]
pub enum CardError {
    /// Network failure, timeout, bad status, or an undecodable body.
    #[error("API unavailable: {0}")]
    Unavailable(#[source] agera_api::Error),

    /// The API answered `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// Data arrived but the renderer produced nothing.
    #[error("Failed to render {card} card")]
    RenderFailed { card: CardKind },
}

impl From<agera_api::Error> for CardError {
    fn from(err: agera_api::Error) -> Self {
        match err {
            agera_api::Error::Rejected { message } => Self::Rejected { message },
            other => Self::Unavailable(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_keeps_api_message() {
        let err = CardError::from(agera_api::Error::Rejected {
            message: "Игрок не найден".into(),
        });
        assert!(matches!(err, CardError::Rejected { ref message } if message == "Игрок не найден"));
        assert_eq!(err.to_string(), "Игрок не найден");
    }

    #[test]
    fn transport_failures_are_unavailable() {
        let err = CardError::from(agera_api::Error::Timeout { timeout_secs: 10 });
        assert!(matches!(err, CardError::Unavailable(_)));
    }

    #[test]
    fn render_failure_names_the_card() {
        let err = CardError::RenderFailed {
            card: CardKind::Staff,
        };
        assert_eq!(err.to_string(), "Failed to render staff card");
    }
}

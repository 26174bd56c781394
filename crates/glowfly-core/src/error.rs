// ── Core error types ──
//
// User-facing errors from glowfly-core. Consumers never see raw
// transport errors or JSON parse failures; the `From<glowfly_api::Error>`
// impl translates them into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach board at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Board rejected the request: {message}")]
    Rejected { message: String },

    #[error("Unexpected payload from board: {message}")]
    BadPayload { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

impl From<glowfly_api::Error> for CoreError {
    fn from(err: glowfly_api::Error) -> Self {
        match err {
            glowfly_api::Error::Transport(e) => Self::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "board".into(), std::string::ToString::to_string),
                reason: e.to_string(),
            },
            glowfly_api::Error::InvalidUrl(e) => Self::ValidationFailed {
                message: format!("invalid URL: {e}"),
            },
            glowfly_api::Error::Api { status, message } => Self::Rejected {
                message: format!("HTTP {status}: {message}"),
            },
            glowfly_api::Error::Deserialization { message, .. } => {
                Self::BadPayload { message }
            }
        }
    }
}

use thiserror::Error;

/// Top-level error type for the `glowfly-api` crate.
///
/// Covers every failure mode of the board's HTTP surface: transport,
/// non-success responses, and payload decoding. `glowfly-core` maps these
/// into user-facing messages and banner text.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success response from the firmware HTTP server.
    #[error("Device API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying
    /// on the next poll tick.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Short transport/status description for banner text, in the shape
    /// the dashboard showed: the status phrase followed by detail.
    pub fn status_text(&self) -> String {
        match self {
            Self::Transport(e) if e.is_timeout() => "timeout".into(),
            Self::Transport(e) if e.is_connect() => "connect error".into(),
            Self::Transport(_) => "transport error".into(),
            Self::InvalidUrl(_) => "invalid URL".into(),
            Self::Api { status, .. } => format!("HTTP {status}"),
            Self::Deserialization { .. } => "bad payload".into(),
        }
    }
}

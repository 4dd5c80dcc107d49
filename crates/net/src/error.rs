//! Generation client error types

/// Client result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generation client errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered with a non-success status. `body` is the parsed
    /// JSON payload, or `{"message": <text>}` when it was not JSON.
    #[error("Upstream returned HTTP {status}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl Error {
    /// Upstream HTTP status, if the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

use thiserror::Error;

/// The request never produced an HTTP response (DNS, connect, reset, ...).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Failures surfaced by `FakeProfileApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Network response was not ok (HTTP {status})")]
    HttpStatus { status: u16 },

    #[error("Malformed JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status for `HttpStatus` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

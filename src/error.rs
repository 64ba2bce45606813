//! Error type shared by every statistics call.

use thiserror::Error;

/// Errors returned by the statistics client.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection failure, timeout, or an invalid request URL.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The response body did not match the expected statistics shape.
    #[error("failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// The cancellation token fired before the call completed.
    #[error("operation cancelled")]
    Cancelled,

    /// An API key or user agent could not be used as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl Error {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error came from a cancelled token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

//! Error types for simulation client operations

use thiserror::Error;

/// Result type alias for simulation client operations
pub type Result<T> = std::result::Result<T, DoipSimClientError>;

/// Errors that can occur during simulation client operations
#[derive(Error, Debug)]
pub enum DoipSimClientError {
    /// HTTP request failed before a status code was produced
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Server returned an error status on a simple (raw body) call
    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    /// Success body could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    DecodeError(#[from] serde_json::Error),
}

impl DoipSimClientError {
    /// Create a server error from status code and response body
    pub fn server_error(status: u16, body: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            body: body.into(),
        }
    }
}

//! Error types for the video generation job lifecycle.

use std::time::Duration;

/// Errors that can occur while driving a generation job.
#[derive(Debug, thiserror::Error)]
pub enum SoragenError {
    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Invalid request parameters (e.g. empty prompt).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// API returned a non-success status code.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// API returned a success status but the body violated the wire contract
    /// (missing `request_id`, completed job without outputs).
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Polling deadline exceeded before the job reached a terminal state.
    #[error("timed out after {0:?} waiting for job completion")]
    Timeout(Duration),

    /// The caller cancelled the job via its cancellation token.
    #[error("operation cancelled")]
    Cancelled,

    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error (e.g. writing the artifact file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SoragenError {
    /// Returns true if the poll loop may swallow this error and retry on the
    /// next tick. Only transport-level failures qualify; contract violations
    /// and terminal outcomes never heal by retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Result type alias for job lifecycle operations.
pub type Result<T> = std::result::Result<T, SoragenError>;

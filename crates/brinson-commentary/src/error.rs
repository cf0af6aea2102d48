//! Error types for commentary operations.

use thiserror::Error;

/// Result type for commentary operations.
pub type Result<T> = std::result::Result<T, CommentaryError>;

/// Errors that can occur when requesting commentary.
#[derive(Debug, Error)]
pub enum CommentaryError {
    /// No API credential is configured. Raised at call time, not at
    /// construction.
    #[error("API key not configured (set OPENAI_API_KEY)")]
    MissingApiKey,

    /// The completion service returned a non-success status.
    #[error("Completion service error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        message: String,
    },

    /// The completion service returned no choices.
    #[error("Completion service returned no choices")]
    EmptyResponse,

    /// Network or response decoding error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

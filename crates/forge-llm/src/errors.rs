//! Inference error types.
//!
//! Callers need to distinguish "the service is down" from "the model is
//! missing" from "the model answered with an error", so each gets its own
//! variant instead of one opaque HTTP error.

use thiserror::Error;

/// Result alias for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Errors from the inference service.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The service could not be reached at all.
    #[error("inference service unreachable at {url}: {detail}")]
    Unreachable {
        /// Base URL that was tried.
        url: String,
        /// Transport-level detail.
        detail: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("inference request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The requested model is not installed on the service.
    #[error("model {0:?} is not available")]
    UnknownModel(String),

    /// The service answered with a non-success status.
    #[error("inference API returned status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("invalid inference response: {0}")]
    Json(#[from] serde_json::Error),
}

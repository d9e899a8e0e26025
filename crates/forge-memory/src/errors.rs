//! Memory error types.

use thiserror::Error;

/// Result alias for memory operations.
pub type Result<T> = std::result::Result<T, MemoryError>;

/// Errors that can occur while persisting project memory.
///
/// Loading never produces these; a bad memory file degrades to a fresh
/// store plus a warning instead.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Filesystem failure while saving.
    #[error("memory I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Memory state could not be encoded.
    #[error("failed to encode memory: {0}")]
    Json(#[from] serde_json::Error),
}

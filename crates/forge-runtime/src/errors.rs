//! Session error types.

use forge_llm::InferenceError;
use forge_memory::MemoryError;
use forge_store::StoreError;
use thiserror::Error;

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors from session orchestration.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A generation is already in flight; the request was not queued.
    #[error("a generation is already in progress")]
    Busy,

    /// The operation was cancelled; no artifact or memory change happened.
    #[error("generation cancelled")]
    Cancelled,

    /// The inference service failed.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// The artifact store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Memory could not be persisted.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

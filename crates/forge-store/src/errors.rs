//! Store error types.

use std::path::PathBuf;

use forge_connectors::ConnectorError;
use forge_core::engine::EngineKind;
use forge_journal::JournalError;
use thiserror::Error;

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during artifact store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The project root failed engine validation.
    #[error("{root} is not a valid {engine} project")]
    ProjectNotReady {
        /// The engine the root was checked against.
        engine: EngineKind,
        /// The rejected root.
        root: PathBuf,
    },

    /// The logical name was rejected before any filesystem access.
    #[error(transparent)]
    InvalidName(#[from] ConnectorError),

    /// The pre-overwrite backup could not be taken.
    ///
    /// The destination file is untouched when this is returned.
    #[error("failed to back up {path}: {source}")]
    BackupFailed {
        /// The file that could not be backed up.
        path: PathBuf,
        /// The underlying copy failure.
        #[source]
        source: std::io::Error,
    },

    /// The write did not complete.
    ///
    /// On overwrite paths the prior content has been restored from the
    /// backup taken just before the attempt.
    #[error("failed to write {path}: {reason}")]
    WriteFailed {
        /// The destination that was being written.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The named artifact does not exist on disk.
    #[error("script {0:?} not found")]
    NotFound(String),

    /// Action log failure.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Other filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

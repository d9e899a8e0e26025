//! Journal error types.

use thiserror::Error;

/// Result alias for journal operations.
pub type Result<T> = std::result::Result<T, JournalError>;

/// Errors that can occur while appending to or reading the action log.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Filesystem failure.
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entry could not be encoded as JSON.
    #[error("failed to encode journal entry: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored line could not be decoded.
    ///
    /// Produced per line during reads; later lines are still yielded, so a
    /// single torn write does not hide the rest of the history.
    #[error("corrupt journal line {line}: {source}")]
    Corrupt {
        /// 1-based line number within the log file.
        line: usize,
        /// The underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}

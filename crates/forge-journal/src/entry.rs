//! Action log entry types.
//!
//! Entries are persisted as one JSON object per line. Field names use
//! camelCase so the files match the rest of the on-disk data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of operation an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogAction {
    /// Project validation attempt.
    Validate,
    /// New file written.
    Write,
    /// Existing file replaced (backup taken first).
    Overwrite,
    /// Backup restored over the current file.
    Restore,
    /// Operation that failed before reaching the filesystem.
    Error,
}

/// Whether the recorded operation succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum LogOutcome {
    /// The operation completed.
    Ok,
    /// The operation failed.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// One record in the append-only action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// When the operation happened.
    pub timestamp: DateTime<Utc>,
    /// The kind of operation.
    pub action: LogAction,
    /// What the operation acted on (a path or logical name).
    pub target: String,
    /// How the operation ended.
    pub outcome: LogOutcome,
}

impl LogEntry {
    /// Build an entry stamped with the current time.
    #[must_use]
    pub fn now(action: LogAction, target: impl Into<String>, outcome: LogOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            target: target.into(),
            outcome,
        }
    }

    /// Build a successful entry stamped with the current time.
    #[must_use]
    pub fn ok(action: LogAction, target: impl Into<String>) -> Self {
        Self::now(action, target, LogOutcome::Ok)
    }

    /// Build a failed entry stamped with the current time.
    #[must_use]
    pub fn failed(
        action: LogAction,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::now(
            action,
            target,
            LogOutcome::Failed {
                reason: reason.into(),
            },
        )
    }
}

//! Settings error types.

use thiserror::Error;

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Filesystem error reading or writing the settings file.
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file contained invalid JSON or an invalid shape.
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Connector error types.

use thiserror::Error;

/// Errors that can occur during connector operations.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The logical name is unsafe or malformed.
    ///
    /// Logical names come from the inference service and are the one
    /// place untrusted external output reaches the filesystem, so
    /// rejection here is a hard requirement, not a convenience.
    #[error("invalid logical name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl ConnectorError {
    /// Shorthand constructor for an invalid-name rejection.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason,
        }
    }
}

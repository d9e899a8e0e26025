//! Logical-name validation.
//!
//! A logical name is the engine-independent identifier the caller (and
//! ultimately the inference service) supplies for a script. It must map
//! to exactly one file inside the engine's script subtree, so anything
//! that could escape that subtree is rejected before touching the
//! filesystem.

use crate::errors::ConnectorError;

/// Validate a logical script name.
///
/// Rejects names that are empty, contain path separators, start with a
/// separator, contain parent-directory segments, contain NUL or other
/// control characters, or consist only of dots.
pub fn validate_logical_name(name: &str) -> Result<(), ConnectorError> {
    if name.is_empty() {
        return Err(ConnectorError::invalid_name(name, "empty name"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ConnectorError::invalid_name(name, "contains path separator"));
    }
    // Separator check above already covers "../x"; this catches bare
    // dot-segments and names like "..cs" that start a parent traversal.
    if name.split('.').all(str::is_empty) {
        return Err(ConnectorError::invalid_name(name, "name is only dots"));
    }
    if name.starts_with("..") {
        return Err(ConnectorError::invalid_name(name, "parent directory segment"));
    }
    if name.chars().any(char::is_control) {
        return Err(ConnectorError::invalid_name(name, "contains control character"));
    }
    Ok(())
}

/// Append `extension` (with dot) unless the name already ends with it.
///
/// Matches the original connectors' behavior: `"Player"` becomes
/// `"Player.cs"`, `"Player.cs"` stays unchanged.
#[must_use]
pub fn with_extension(name: &str, extension: &str) -> String {
    if name.ends_with(extension) {
        name.to_string()
    } else {
        format!("{name}{extension}")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Project and artifact records.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use forge_core::engine::EngineKind;
use serde::{Deserialize, Serialize};

/// A game project the assistant operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The engine this project belongs to.
    pub engine: EngineKind,
    /// Absolute project root.
    pub root: PathBuf,
    /// Whether the root passed engine validation.
    ///
    /// Write operations refuse unvalidated projects; a `false` here is a
    /// "not ready" state, never an error in itself.
    pub validated: bool,
}

/// Record of a script file the store has written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptArtifact {
    /// Engine-independent name the caller used.
    pub logical_name: String,
    /// Where the file landed on disk.
    pub resolved_path: PathBuf,
    /// What the script is for, as described by the caller.
    pub purpose: String,
    /// When this artifact was first written.
    pub created_at: DateTime<Utc>,
    /// When this artifact was last written.
    pub modified_at: DateTime<Utc>,
    /// The backup taken before the most recent overwrite, if any.
    pub backup_path: Option<PathBuf>,
}

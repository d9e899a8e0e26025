//! Persisted memory data model.
//!
//! The whole structure is one JSON document on disk. Field names use
//! camelCase to match the rest of the persisted data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use forge_core::engine::EngineKind;
use serde::{Deserialize, Serialize};

/// Descriptive facts about the project being worked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInfo {
    /// Project name.
    pub name: String,
    /// Game genre ("platformer", "roguelike", ...).
    pub genre: String,
    /// Free-form description.
    pub description: String,
    /// The engine the project targets, once known.
    pub engine: Option<EngineKind>,
    /// When this memory was first created.
    pub created: DateTime<Utc>,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            genre: String::new(),
            description: String::new(),
            engine: None,
            created: Utc::now(),
        }
    }
}

/// What memory remembers about one written script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    /// Engine-independent script name.
    pub logical_name: String,
    /// What the script is for.
    pub purpose: String,
    /// When the script was first recorded.
    pub created_at: DateTime<Utc>,
    /// When the script was last recorded.
    pub modified_at: DateTime<Utc>,
}

/// Priority of a pending task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TodoPriority {
    /// Nice to have.
    Low,
    /// Normal work item.
    #[default]
    Medium,
    /// Blocking or urgent.
    High,
}

impl std::fmt::Display for TodoPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// One pending task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// What to do.
    pub task: String,
    /// How urgent it is.
    #[serde(default)]
    pub priority: TodoPriority,
    /// When the task was added.
    pub added: DateTime<Utc>,
}

/// The complete persisted memory document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMemory {
    /// Project facts.
    pub project: ProjectInfo,
    /// Scripts recorded so far, in insertion order.
    pub artifacts: Vec<ArtifactSummary>,
    /// Pending tasks, in insertion order.
    pub todos: Vec<Todo>,
    /// User preferences, sorted by key for stable output.
    pub preferences: BTreeMap<String, String>,
    /// When any part of this document last changed.
    pub last_updated: DateTime<Utc>,
}

impl Default for ProjectMemory {
    fn default() -> Self {
        Self {
            project: ProjectInfo::default(),
            artifacts: Vec::new(),
            todos: Vec::new(),
            preferences: BTreeMap::new(),
            last_updated: Utc::now(),
        }
    }
}

/// Aggregate counters for status displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    /// Number of recorded scripts.
    pub total_artifacts: usize,
    /// Number of pending tasks.
    pub pending_todos: usize,
    /// Whole days since the memory was created.
    pub days_active: i64,
    /// Last modification time.
    pub last_updated: DateTime<Utc>,
}

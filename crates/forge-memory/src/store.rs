//! Durable memory store.
//!
//! Every mutation persists before returning, via write-to-temp + rename so
//! a crash cannot leave a torn memory file. Loading never fails: a missing
//! file yields a fresh store, a corrupt file yields a fresh store plus a
//! warning the caller can surface.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::{ArtifactSummary, MemoryStats, ProjectInfo, ProjectMemory, Todo, TodoPriority};

/// Why a memory file was replaced with a fresh one at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryWarning {
    /// The file existed but could not be read or parsed.
    Corrupt {
        /// The offending file.
        path: PathBuf,
        /// The read or parse failure, rendered.
        detail: String,
    },
}

impl std::fmt::Display for MemoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corrupt { path, detail } => {
                write!(f, "memory file {} was corrupt ({detail}); starting fresh", path.display())
            }
        }
    }
}

/// Project memory backed by a JSON file.
#[derive(Debug)]
pub struct MemoryStore {
    path: PathBuf,
    memory: ProjectMemory,
}

impl MemoryStore {
    /// Load memory from `path`.
    ///
    /// Never fails. A missing file is the normal first-run case and
    /// produces no warning; an unreadable or unparsable file produces a
    /// fresh store and [`MemoryWarning::Corrupt`].
    pub fn load(path: impl Into<PathBuf>) -> (Self, Option<MemoryWarning>) {
        let path = path.into();
        let (memory, warning) = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(memory) => {
                    debug!(?path, "project memory loaded");
                    (memory, None)
                }
                Err(e) => corrupt(&path, e.to_string()),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "no memory file, starting fresh");
                (ProjectMemory::default(), None)
            }
            Err(e) => corrupt(&path, e.to_string()),
        };
        (Self { path, memory }, warning)
    }

    /// The current memory state.
    #[must_use]
    pub fn memory(&self) -> &ProjectMemory {
        &self.memory
    }

    /// Where this store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a written script. Idempotent on `logical_name`: a repeat
    /// updates the purpose and modification time but keeps `created_at`.
    pub fn record_artifact(&mut self, logical_name: &str, purpose: &str) -> Result<()> {
        let now = Utc::now();
        if let Some(existing) = self
            .memory
            .artifacts
            .iter_mut()
            .find(|a| a.logical_name == logical_name)
        {
            existing.purpose = purpose.to_string();
            existing.modified_at = now;
        } else {
            self.memory.artifacts.push(ArtifactSummary {
                logical_name: logical_name.to_string(),
                purpose: purpose.to_string(),
                created_at: now,
                modified_at: now,
            });
        }
        self.save()
    }

    /// Look up a recorded script by name.
    #[must_use]
    pub fn get_artifact(&self, logical_name: &str) -> Option<&ArtifactSummary> {
        self.memory
            .artifacts
            .iter()
            .find(|a| a.logical_name == logical_name)
    }

    /// Case-insensitive search over script names and purposes.
    #[must_use]
    pub fn search_artifacts(&self, query: &str) -> Vec<&ArtifactSummary> {
        let query = query.to_lowercase();
        self.memory
            .artifacts
            .iter()
            .filter(|a| {
                a.logical_name.to_lowercase().contains(&query)
                    || a.purpose.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Add a pending task.
    pub fn add_todo(&mut self, task: &str, priority: TodoPriority) -> Result<()> {
        self.memory.todos.push(Todo {
            task: task.to_string(),
            priority,
            added: Utc::now(),
        });
        self.save()
    }

    /// Remove a task by position. Returns the removed task, or `None` when
    /// the index is out of range (nothing is persisted in that case).
    pub fn remove_todo(&mut self, index: usize) -> Result<Option<Todo>> {
        if index >= self.memory.todos.len() {
            return Ok(None);
        }
        let removed = self.memory.todos.remove(index);
        self.save()?;
        Ok(Some(removed))
    }

    /// Set one user preference.
    pub fn set_preference(&mut self, key: &str, value: &str) -> Result<()> {
        let _ = self
            .memory
            .preferences
            .insert(key.to_string(), value.to_string());
        self.save()
    }

    /// Replace the project facts, keeping the original creation time.
    pub fn set_project_info(&mut self, info: ProjectInfo) -> Result<()> {
        let created = self.memory.project.created;
        self.memory.project = ProjectInfo { created, ..info };
        self.save()
    }

    /// Reset memory to a fresh state and persist it.
    pub fn clear(&mut self) -> Result<()> {
        self.memory = ProjectMemory::default();
        self.save()
    }

    /// Aggregate counters for status displays.
    #[must_use]
    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            total_artifacts: self.memory.artifacts.len(),
            pending_todos: self.memory.todos.len(),
            days_active: (Utc::now() - self.memory.project.created).num_days(),
            last_updated: self.memory.last_updated,
        }
    }

    /// Persist the current state atomically.
    ///
    /// Writes to a sibling temp file, then renames over the target, so
    /// readers only ever see a complete document.
    fn save(&mut self) -> Result<()> {
        self.memory.last_updated = Utc::now();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.memory)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn corrupt(path: &Path, detail: String) -> (ProjectMemory, Option<MemoryWarning>) {
    warn!(?path, %detail, "memory file corrupt, reinitializing");
    (
        ProjectMemory::default(),
        Some(MemoryWarning::Corrupt {
            path: path.to_path_buf(),
            detail,
        }),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn temp_store() -> (tempfile::TempDir, MemoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let (store, warning) = MemoryStore::load(dir.path().join("project_memory.json"));
        assert!(warning.is_none());
        (dir, store)
    }

    #[test]
    fn missing_file_is_fresh_without_warning() {
        let (_dir, store) = temp_store();
        assert!(store.memory().artifacts.is_empty());
    }

    #[test]
    fn corrupt_file_warns_and_reinitializes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project_memory.json");
        std::fs::write(&path, "{ not json").unwrap();

        let (store, warning) = MemoryStore::load(&path);
        assert_matches!(warning, Some(MemoryWarning::Corrupt { .. }));
        assert!(store.memory().artifacts.is_empty());
    }

    #[test]
    fn mutations_survive_reload() {
        let (dir, mut store) = temp_store();
        store.record_artifact("Player", "movement").unwrap();
        store.add_todo("add jump", TodoPriority::High).unwrap();
        store.set_preference("namingConvention", "PascalCase").unwrap();

        let (reloaded, warning) = MemoryStore::load(dir.path().join("project_memory.json"));
        assert!(warning.is_none());
        assert_eq!(reloaded.memory().artifacts.len(), 1);
        assert_eq!(reloaded.memory().todos[0].task, "add jump");
        assert_eq!(
            reloaded.memory().preferences["namingConvention"],
            "PascalCase"
        );
    }

    #[test]
    fn record_artifact_upserts_preserving_created_at() {
        let (_dir, mut store) = temp_store();
        store.record_artifact("Player", "movement").unwrap();
        let created = store.get_artifact("Player").unwrap().created_at;

        store.record_artifact("Player", "movement and jumping").unwrap();
        let artifact = store.get_artifact("Player").unwrap();
        assert_eq!(store.memory().artifacts.len(), 1);
        assert_eq!(artifact.created_at, created);
        assert_eq!(artifact.purpose, "movement and jumping");
        assert!(artifact.modified_at >= created);
    }

    #[test]
    fn remove_todo_out_of_range_is_none() {
        let (_dir, mut store) = temp_store();
        store.add_todo("one", TodoPriority::Medium).unwrap();
        assert!(store.remove_todo(5).unwrap().is_none());
        assert_eq!(store.memory().todos.len(), 1);

        let removed = store.remove_todo(0).unwrap().unwrap();
        assert_eq!(removed.task, "one");
        assert!(store.memory().todos.is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_purpose() {
        let (_dir, mut store) = temp_store();
        store.record_artifact("PlayerController", "movement").unwrap();
        store.record_artifact("EnemyAI", "chase the player").unwrap();

        let hits = store.search_artifacts("PLAYER");
        assert_eq!(hits.len(), 2);
        let hits = store.search_artifacts("chase");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].logical_name, "EnemyAI");
    }

    #[test]
    fn set_project_info_keeps_creation_time() {
        let (_dir, mut store) = temp_store();
        let created = store.memory().project.created;
        store
            .set_project_info(ProjectInfo {
                name: "Pong".to_string(),
                genre: "arcade".to_string(),
                ..ProjectInfo::default()
            })
            .unwrap();
        assert_eq!(store.memory().project.name, "Pong");
        assert_eq!(store.memory().project.created, created);
    }

    #[test]
    fn clear_resets_and_persists() {
        let (dir, mut store) = temp_store();
        store.record_artifact("Player", "movement").unwrap();
        store.clear().unwrap();

        let (reloaded, _) = MemoryStore::load(dir.path().join("project_memory.json"));
        assert!(reloaded.memory().artifacts.is_empty());
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let (dir, mut store) = temp_store();
        store.record_artifact("Player", "movement").unwrap();
        assert!(!dir.path().join("project_memory.json.tmp").exists());
        assert!(dir.path().join("project_memory.json").exists());
    }

    #[test]
    fn stats_counts() {
        let (_dir, mut store) = temp_store();
        store.record_artifact("Player", "movement").unwrap();
        store.add_todo("one", TodoPriority::Low).unwrap();
        store.add_todo("two", TodoPriority::High).unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_artifacts, 1);
        assert_eq!(stats.pending_todos, 2);
        assert_eq!(stats.days_active, 0);
    }
}

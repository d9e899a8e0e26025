//! The artifact store.
//!
//! Invariants:
//! - an overwrite never proceeds without a successful sibling backup
//! - a failed write leaves the prior content in place (restored from the
//!   backup taken immediately before the attempt)
//! - every outcome, success or failure, lands in the action log; a write
//!   that could not be logged is reported as failed

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::Utc;
use forge_connectors::{connector_for, EngineConnector};
use forge_core::engine::EngineKind;
use forge_journal::{ActionLog, LogAction, LogEntry};
use tracing::{info, warn};

use crate::errors::{Result, StoreError};
use crate::types::{Project, ScriptArtifact};

/// Writes script files with backup-before-overwrite discipline.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    journal: ActionLog,
}

impl ArtifactStore {
    /// Create a store recording to `journal`.
    #[must_use]
    pub fn new(journal: ActionLog) -> Self {
        Self { journal }
    }

    /// The action log this store records to.
    #[must_use]
    pub fn journal(&self) -> &ActionLog {
        &self.journal
    }

    /// Validate `root` as a project for `engine`, recording the attempt.
    ///
    /// A failed validation is a state, not an error: the returned project
    /// simply has `validated == false`.
    pub fn validate(&self, engine: EngineKind, root: impl Into<PathBuf>) -> Result<Project> {
        let root = root.into();
        let validated = connector_for(engine).validate_project(&root);
        let entry = if validated {
            LogEntry::ok(LogAction::Validate, root.display().to_string())
        } else {
            LogEntry::failed(
                LogAction::Validate,
                root.display().to_string(),
                format!("not a {engine} project"),
            )
        };
        self.journal.append(&entry)?;
        Ok(Project {
            engine,
            root,
            validated,
        })
    }

    /// Write `content` as the script named `logical_name`.
    ///
    /// If the destination already exists it is copied to a `.bak` sibling
    /// first; a backup failure aborts the whole write. If the write itself
    /// fails, the prior content is restored from that backup.
    pub fn write(
        &self,
        project: &Project,
        logical_name: &str,
        content: &str,
        purpose: &str,
    ) -> Result<ScriptArtifact> {
        let connector = self.ready_connector(project, logical_name)?;
        let path = match connector.resolve_path(&project.root, logical_name) {
            Ok(p) => p,
            Err(e) => {
                self.log_best_effort(&LogEntry::failed(
                    LogAction::Error,
                    logical_name,
                    e.to_string(),
                ));
                return Err(e.into());
            }
        };

        let overwriting = path.is_file();
        let action = if overwriting {
            LogAction::Overwrite
        } else {
            LogAction::Write
        };
        let target = path.display().to_string();

        let backup = if overwriting {
            let backup = backup_path(&path);
            if let Err(source) = std::fs::copy(&path, &backup) {
                self.log_best_effort(&LogEntry::failed(
                    action,
                    &target,
                    format!("backup failed: {source}"),
                ));
                return Err(StoreError::BackupFailed { path, source });
            }
            Some(backup)
        } else {
            None
        };

        if let Err(e) = write_content(&path, content) {
            // Roll back to the state captured just before the attempt.
            if let Some(ref backup) = backup {
                if let Err(restore_err) = std::fs::copy(backup, &path) {
                    warn!(error = %restore_err, ?path, "rollback from backup failed");
                }
            }
            self.log_best_effort(&LogEntry::failed(action, &target, e.to_string()));
            return Err(StoreError::WriteFailed {
                path,
                reason: e.to_string(),
            });
        }

        if let Err(e) = self.journal.append(&LogEntry::ok(action, &target)) {
            // The file is in its new state; refusing to report success
            // keeps "written" synonymous with "written and recorded".
            return Err(StoreError::WriteFailed {
                path,
                reason: format!("content written but journal append failed: {e}"),
            });
        }

        info!(%target, overwriting, "script written");
        let now = Utc::now();
        Ok(ScriptArtifact {
            logical_name: logical_name.to_string(),
            resolved_path: path,
            purpose: purpose.to_string(),
            created_at: now,
            modified_at: now,
            backup_path: backup,
        })
    }

    /// Restore the most recent backup of `logical_name` over the current
    /// file. Returns `Ok(false)` when no backup exists.
    pub fn restore_last(&self, project: &Project, logical_name: &str) -> Result<bool> {
        let connector = self.ready_connector(project, logical_name)?;
        let path = connector.resolve_path(&project.root, logical_name)?;
        let backup = backup_path(&path);
        if !backup.is_file() {
            return Ok(false);
        }

        let target = path.display().to_string();
        if let Err(e) = std::fs::copy(&backup, &path) {
            self.log_best_effort(&LogEntry::failed(
                LogAction::Restore,
                &target,
                e.to_string(),
            ));
            return Err(e.into());
        }
        self.journal.append(&LogEntry::ok(LogAction::Restore, &target))?;
        info!(%target, "backup restored");
        Ok(true)
    }

    /// Read the current content of `logical_name`.
    pub fn read(&self, project: &Project, logical_name: &str) -> Result<String> {
        let connector = self.ready_connector(project, logical_name)?;
        let path = connector.resolve_path(&project.root, logical_name)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(logical_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn ready_connector(
        &self,
        project: &Project,
        logical_name: &str,
    ) -> Result<&'static dyn EngineConnector> {
        if !project.validated {
            self.log_best_effort(&LogEntry::failed(
                LogAction::Error,
                logical_name,
                "project not validated",
            ));
            return Err(StoreError::ProjectNotReady {
                engine: project.engine,
                root: project.root.clone(),
            });
        }
        Ok(connector_for(project.engine))
    }

    /// Log a failure-path entry; the original failure stays primary even
    /// when the log append itself fails.
    fn log_best_effort(&self, entry: &LogEntry) {
        if let Err(e) = self.journal.append(entry) {
            warn!(error = %e, target = %entry.target, "could not record journal entry");
        }
    }
}

/// Sibling backup slot for a script path (`Player.cs` -> `Player.cs.bak`).
fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

fn write_content(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Script listing.
//!
//! Walks the engine's script directory and reports the script files found
//! there, for status displays and memory reconciliation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use walkdir::WalkDir;

use crate::EngineConnector;

/// Metadata for one script file found on disk.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptFileInfo {
    /// File name without directory components.
    pub name: String,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Last modification time, if the filesystem reports one.
    pub modified: Option<DateTime<Utc>>,
}

/// List all script files in the connector's script directory under `root`.
///
/// Only files with the engine's script extension are included. Results are
/// sorted by relative path for stable output. A missing script directory
/// yields an empty list; unreadable entries are skipped with a warning.
#[must_use]
pub fn list_scripts(connector: &dyn EngineConnector, root: &Path) -> Vec<ScriptFileInfo> {
    let script_dir = connector.script_dir(root);
    if !script_dir.is_dir() {
        return Vec::new();
    }

    let extension = connector.engine().extension();
    let mut scripts = Vec::new();
    for entry in WalkDir::new(&script_dir).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry while listing scripts");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !path.to_string_lossy().ends_with(extension) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            warn!(?path, "could not stat script file, skipping");
            continue;
        };
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        scripts.push(ScriptFileInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            relative_path,
            size_bytes: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::from),
        });
    }
    scripts.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    scripts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnityConnector;

    #[test]
    fn missing_script_dir_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_scripts(&UnityConnector, dir.path()).is_empty());
    }

    #[test]
    fn lists_only_matching_extension() {
        let dir = tempfile::tempdir().unwrap();
        let scripts = dir.path().join("Assets/Scripts");
        std::fs::create_dir_all(&scripts).unwrap();
        std::fs::write(scripts.join("Player.cs"), "class Player {}").unwrap();
        std::fs::write(scripts.join("notes.txt"), "ignore me").unwrap();

        let found = list_scripts(&UnityConnector, dir.path());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Player.cs");
        assert_eq!(
            found[0].relative_path,
            Path::new("Assets/Scripts/Player.cs")
        );
        assert_eq!(found[0].size_bytes, 15);
    }

    #[test]
    fn recurses_into_subdirectories_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let scripts = dir.path().join("Assets/Scripts");
        std::fs::create_dir_all(scripts.join("ai")).unwrap();
        std::fs::write(scripts.join("Zebra.cs"), "").unwrap();
        std::fs::write(scripts.join("ai/Enemy.cs"), "").unwrap();

        let found = list_scripts(&UnityConnector, dir.path());
        let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Enemy.cs", "Zebra.cs"]);
    }

    #[test]
    fn modified_time_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let scripts = dir.path().join("Assets/Scripts");
        std::fs::create_dir_all(&scripts).unwrap();
        std::fs::write(scripts.join("A.cs"), "x").unwrap();

        let found = list_scripts(&UnityConnector, dir.path());
        assert!(found[0].modified.is_some());
    }
}

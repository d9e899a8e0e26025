//! Unreal Engine connector.
//!
//! An Unreal project is recognized by a `*.uproject` file at its root.
//! The canonical script artifact is the `.cpp` file under `Source/`; the
//! matching header include is prepended during wrap.

use std::path::{Path, PathBuf};

use forge_core::engine::EngineKind;
use tracing::debug;

use crate::EngineConnector;

/// Connector for Unreal Engine projects.
pub struct UnrealConnector;

impl UnrealConnector {
    /// Whether `root` contains a `*.uproject` file.
    ///
    /// Read failures count as "no project file found".
    fn has_uproject(root: &Path) -> bool {
        let Ok(entries) = std::fs::read_dir(root) else {
            return false;
        };
        entries.flatten().any(|entry| {
            entry.path().extension().is_some_and(|ext| ext == "uproject")
                && entry.path().is_file()
        })
    }
}

impl EngineConnector for UnrealConnector {
    fn engine(&self) -> EngineKind {
        EngineKind::Unreal
    }

    fn validate_project(&self, root: &Path) -> bool {
        let ok = Self::has_uproject(root);
        if !ok {
            debug!(?root, "no .uproject file, not an Unreal project");
        }
        ok
    }

    fn script_dir(&self, root: &Path) -> PathBuf {
        root.join("Source")
    }

    fn wrap(&self, logical_name: &str, content: &str) -> String {
        // The logical name may already carry the .cpp extension.
        let class_name = logical_name.strip_suffix(".cpp").unwrap_or(logical_name);
        let include = format!("#include \"{class_name}.h\"");
        if content.contains(&include) {
            content.to_string()
        } else {
            format!("{include}\n\n{content}")
        }
    }
}

//! Unity connector.
//!
//! A Unity project is recognized by its `Assets/` directory. Scripts are
//! C# files under `Assets/Scripts/`.

use std::path::{Path, PathBuf};

use forge_core::engine::EngineKind;
use tracing::debug;

use crate::EngineConnector;

/// Connector for Unity projects.
pub struct UnityConnector;

impl EngineConnector for UnityConnector {
    fn engine(&self) -> EngineKind {
        EngineKind::Unity
    }

    fn validate_project(&self, root: &Path) -> bool {
        let ok = root.join("Assets").is_dir();
        if !ok {
            debug!(?root, "no Assets directory, not a Unity project");
        }
        ok
    }

    fn script_dir(&self, root: &Path) -> PathBuf {
        root.join("Assets").join("Scripts")
    }

    fn wrap(&self, _logical_name: &str, content: &str) -> String {
        if content.contains("using UnityEngine") {
            content.to_string()
        } else {
            format!("using UnityEngine;\n\n{content}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_assets_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!UnityConnector.validate_project(dir.path()));

        std::fs::create_dir(dir.path().join("Assets")).unwrap();
        assert!(UnityConnector.validate_project(dir.path()));
    }

    #[test]
    fn assets_as_file_does_not_validate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Assets"), "").unwrap();
        assert!(!UnityConnector.validate_project(dir.path()));
    }

    #[test]
    fn missing_root_does_not_validate() {
        assert!(!UnityConnector.validate_project(Path::new("/nonexistent/project")));
    }

    #[test]
    fn script_dir_is_assets_scripts() {
        assert_eq!(
            UnityConnector.script_dir(Path::new("/p")),
            Path::new("/p/Assets/Scripts")
        );
    }

    #[test]
    fn wrap_adds_using_directive() {
        let wrapped = UnityConnector.wrap("Player", "public class Player {}");
        assert!(wrapped.starts_with("using UnityEngine;\n\n"));
        assert!(wrapped.ends_with("public class Player {}"));
    }

    #[test]
    fn wrap_is_idempotent() {
        let once = UnityConnector.wrap("Player", "public class Player {}");
        let twice = UnityConnector.wrap("Player", &once);
        assert_eq!(once, twice);
    }
}

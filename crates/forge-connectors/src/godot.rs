//! Godot connector.
//!
//! A Godot project is recognized by its `project.godot` file. Scripts are
//! GDScript files under `scripts/`.

use std::path::{Path, PathBuf};

use forge_core::engine::EngineKind;
use tracing::debug;

use crate::EngineConnector;

/// Connector for Godot projects.
pub struct GodotConnector;

impl EngineConnector for GodotConnector {
    fn engine(&self) -> EngineKind {
        EngineKind::Godot
    }

    fn validate_project(&self, root: &Path) -> bool {
        let ok = root.join("project.godot").is_file();
        if !ok {
            debug!(?root, "no project.godot, not a Godot project");
        }
        ok
    }

    fn script_dir(&self, root: &Path) -> PathBuf {
        root.join("scripts")
    }

    fn wrap(&self, _logical_name: &str, content: &str) -> String {
        if content.contains("extends ") {
            content.to_string()
        } else {
            format!("extends Node\n\n{content}")
        }
    }
}

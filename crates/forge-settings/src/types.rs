//! Settings type definitions.
//!
//! All structs use camelCase serde names to match the on-disk
//! `settings.json`. Every field has a compiled default so a partial user
//! file deep-merges cleanly over [`ForgeSettings::default()`].

use std::path::PathBuf;

use forge_core::engine::EngineKind;
use serde::{Deserialize, Serialize};

/// Top-level settings for the Forge assistant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForgeSettings {
    /// Settings schema version.
    pub version: u32,
    /// The active target engine.
    pub engine: EngineKind,
    /// Per-engine project root paths.
    pub project_paths: ProjectPaths,
    /// Context window bounds.
    pub context: ContextSettings,
    /// Inference service connection.
    pub inference: InferenceSettings,
    /// On-disk storage locations.
    pub storage: StorageSettings,
}

impl Default for ForgeSettings {
    fn default() -> Self {
        Self {
            version: 1,
            engine: EngineKind::Unity,
            project_paths: ProjectPaths::default(),
            context: ContextSettings::default(),
            inference: InferenceSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

impl ForgeSettings {
    /// The configured project root for an engine, if any.
    #[must_use]
    pub fn project_root_for(&self, engine: EngineKind) -> Option<&PathBuf> {
        match engine {
            EngineKind::Unity => self.project_paths.unity.as_ref(),
            EngineKind::Godot => self.project_paths.godot.as_ref(),
            EngineKind::Unreal => self.project_paths.unreal.as_ref(),
        }
    }
}

/// Last-used project root per engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPaths {
    /// Unity project root.
    pub unity: Option<PathBuf>,
    /// Godot project root.
    pub godot: Option<PathBuf>,
    /// Unreal project root.
    pub unreal: Option<PathBuf>,
}

/// Bounds on the context assembled for generation requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextSettings {
    /// Maximum artifact summaries included in a context window.
    pub max_items: usize,
    /// Maximum rendered context size in characters.
    pub max_chars: usize,
    /// Maximum chat turns retained when composing a prompt.
    pub max_chat_history: usize,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            max_items: 5,
            max_chars: 2000,
            max_chat_history: 100,
        }
    }
}

/// Connection settings for the local inference service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferenceSettings {
    /// Base URL of the inference HTTP API.
    pub base_url: String,
    /// Model identifier to request.
    pub model: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            timeout_ms: 120_000,
        }
    }
}

/// On-disk storage locations for memory, log, and reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    /// Directory holding the memory file, action log, and specs report.
    pub data_dir: PathBuf,
    /// Accepted for compatibility with older config files; backups are
    /// always taken regardless of this value.
    pub auto_backup: bool,
}

impl StorageSettings {
    /// Path of the durable memory file.
    #[must_use]
    pub fn memory_path(&self) -> PathBuf {
        self.data_dir.join("project_memory.json")
    }

    /// Path of the append-only action log.
    #[must_use]
    pub fn action_log_path(&self) -> PathBuf {
        self.data_dir.join("actions.log")
    }

    /// Path of the hardware specs report.
    #[must_use]
    pub fn specs_path(&self) -> PathBuf {
        self.data_dir.join("system_specs.json")
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        Self {
            data_dir: PathBuf::from(home).join(".forge").join("data"),
            auto_backup: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

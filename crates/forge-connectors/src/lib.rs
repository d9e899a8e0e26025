//! # forge-connectors
//!
//! Per-engine project policy for the Forge assistant.
//!
//! Each supported engine gets a connector implementing [`EngineConnector`]:
//! - **Validation** — does a directory look like a project for this engine?
//! - **Path resolution** — map a logical script name to the canonical file
//!   inside the project, rejecting unsafe names first
//! - **Wrap/unwrap** — pure text transforms between generated content and
//!   what lands on disk (boilerplate in, markdown fences out)
//!
//! Connectors hold no state; [`connector_for`] hands out static instances.

#![deny(unsafe_code)]

pub mod errors;
pub mod godot;
pub mod listing;
pub mod name;
pub mod unity;
pub mod unreal;

pub use errors::ConnectorError;
pub use godot::GodotConnector;
pub use listing::{list_scripts, ScriptFileInfo};
pub use unity::UnityConnector;
pub use unreal::UnrealConnector;

use std::path::{Path, PathBuf};

use forge_core::engine::EngineKind;

use crate::name::{validate_logical_name, with_extension};

/// Engine-specific project policy.
///
/// Implementations are stateless and cheap; all project context arrives as
/// arguments. `wrap` and `unwrap` are pure text transforms with no
/// filesystem access.
pub trait EngineConnector: Send + Sync {
    /// Which engine this connector serves.
    fn engine(&self) -> EngineKind;

    /// Whether `root` looks like a project for this engine.
    ///
    /// Purely observational: never creates anything, and any I/O failure
    /// (missing directory, permission denied) reads as `false`.
    fn validate_project(&self, root: &Path) -> bool;

    /// The directory under `root` where scripts belong.
    fn script_dir(&self, root: &Path) -> PathBuf;

    /// Resolve a logical script name to its canonical path under `root`.
    ///
    /// Validates the name first, then appends the engine extension unless
    /// the name already carries it. Never touches the filesystem.
    fn resolve_path(&self, root: &Path, logical_name: &str) -> Result<PathBuf, ConnectorError> {
        validate_logical_name(logical_name)?;
        let file_name = with_extension(logical_name, self.engine().extension());
        Ok(self.script_dir(root).join(file_name))
    }

    /// Transform generated content into what should land on disk.
    ///
    /// Adds engine boilerplate when it is missing. Idempotent: wrapping
    /// already-wrapped content changes nothing.
    fn wrap(&self, logical_name: &str, content: &str) -> String;

    /// Strip transport artifacts from generated content.
    ///
    /// The default removes a single markdown code fence when the whole
    /// payload is fenced, which is how inference output usually arrives.
    fn unwrap_content(&self, content: &str) -> String {
        strip_code_fence(content)
    }
}

/// Get the connector for an engine.
#[must_use]
pub fn connector_for(engine: EngineKind) -> &'static dyn EngineConnector {
    match engine {
        EngineKind::Unity => &UnityConnector,
        EngineKind::Godot => &GodotConnector,
        EngineKind::Unreal => &UnrealConnector,
    }
}

/// Remove a surrounding markdown code fence, if the entire payload is one.
///
/// Handles an optional language tag on the opening fence. Content without a
/// fence (or with an unterminated one) passes through untouched apart from
/// trailing-whitespace trimming.
#[must_use]
pub fn strip_code_fence(content: &str) -> String {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed.to_string();
    };
    // Drop the language tag line ("csharp", "gdscript", ...) if present.
    let body = match body.split_once('\n') {
        Some((tag, remainder)) if !tag.trim().contains(' ') => remainder,
        _ => body,
    };
    body.trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connector_for_matches_engine() {
        for kind in EngineKind::ALL {
            assert_eq!(connector_for(kind).engine(), kind);
        }
    }

    #[test]
    fn resolve_appends_extension() {
        let c = connector_for(EngineKind::Unity);
        let path = c.resolve_path(Path::new("/proj"), "Player").unwrap();
        assert_eq!(path, Path::new("/proj/Assets/Scripts/Player.cs"));
    }

    #[test]
    fn resolve_keeps_existing_extension() {
        let c = connector_for(EngineKind::Godot);
        let path = c.resolve_path(Path::new("/proj"), "player.gd").unwrap();
        assert_eq!(path, Path::new("/proj/scripts/player.gd"));
    }

    #[test]
    fn resolve_rejects_traversal() {
        let c = connector_for(EngineKind::Unity);
        assert!(c.resolve_path(Path::new("/proj"), "../escape").is_err());
    }

    #[test]
    fn strip_fence_with_language_tag() {
        let input = "```csharp\nusing UnityEngine;\n\npublic class A {}\n```";
        assert_eq!(
            strip_code_fence(input),
            "using UnityEngine;\n\npublic class A {}"
        );
    }

    #[test]
    fn strip_fence_without_language_tag() {
        let input = "```\nextends Node\n```";
        assert_eq!(strip_code_fence(input), "extends Node");
    }

    #[test]
    fn unfenced_content_passes_through() {
        assert_eq!(strip_code_fence("  plain code\n"), "plain code");
    }

    #[test]
    fn unterminated_fence_passes_through() {
        let input = "```csharp\nno closing fence";
        assert_eq!(strip_code_fence(input), input);
    }

    #[test]
    fn interior_fences_are_kept() {
        let input = "```\nlet s = \"```\";\nmore\n```";
        // Only the outermost fence is stripped.
        assert_eq!(strip_code_fence(input), "let s = \"```\";\nmore");
    }
}

//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`ForgeSettings::default()`]
//! 2. If `~/.forge/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use forge_core::engine::EngineKind;
use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::ForgeSettings;

/// Resolve the path to the settings file (`~/.forge/settings.json`).
#[must_use]
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".forge").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<ForgeSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<ForgeSettings> {
    let defaults = serde_json::to_value(ForgeSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: ForgeSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
#[must_use]
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Each env var has strict parsing rules; invalid values are ignored with
/// a warning (fall back to file/default).
pub fn apply_env_overrides(settings: &mut ForgeSettings) {
    if let Some(v) = read_env_engine("FORGE_ENGINE") {
        settings.engine = v;
    }
    if let Some(v) = read_env_string("FORGE_DATA_DIR") {
        settings.storage.data_dir = PathBuf::from(v);
    }
    if let Some(v) = read_env_string("FORGE_BASE_URL") {
        settings.inference.base_url = v;
    }
    if let Some(v) = read_env_string("FORGE_MODEL") {
        settings.inference.model = v;
    }
    if let Some(v) = read_env_u64("FORGE_TIMEOUT_MS", 1000, 3_600_000) {
        settings.inference.timeout_ms = v;
    }
    if let Some(v) = read_env_usize("FORGE_MAX_CONTEXT_ITEMS", 1, 1000) {
        settings.context.max_items = v;
    }
    if let Some(v) = read_env_usize("FORGE_MAX_CONTEXT_CHARS", 100, 1_000_000) {
        settings.context.max_chars = v;
    }
    if let Some(v) = read_env_usize("FORGE_MAX_CHAT_HISTORY", 1, 10_000) {
        settings.context.max_chat_history = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a `u64` within a range.
#[must_use]
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `usize` within a range.
#[must_use]
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_engine(name: &str) -> Option<EngineKind> {
    let val = std::env::var(name).ok()?;
    let result = val.parse().ok();
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid engine env var, ignoring");
    }
    result
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

fn read_env_usize(name: &str, min: usize, max: usize) -> Option<usize> {
    let val = std::env::var(name).ok()?;
    let result = parse_usize_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid usize env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SettingsError;

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_simple_override() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": 10});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 10);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({
            "inference": {"model": "llama3.2:3b", "timeoutMs": 120000}
        });
        let source = serde_json::json!({
            "inference": {"model": "qwen2.5-coder"}
        });
        let merged = deep_merge(target, source);
        assert_eq!(merged["inference"]["model"], "qwen2.5-coder");
        assert_eq!(merged["inference"]["timeoutMs"], 120_000);
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"items": [1, 2, 3]});
        let source = serde_json::json!({"items": [4]});
        let merged = deep_merge(target, source);
        assert_eq!(merged["items"], serde_json::json!([4]));
    }

    #[test]
    fn merge_new_keys_added() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"b": 2});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    // ── load_settings_from_path ─────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let settings =
            load_settings_from_path(Path::new("/nonexistent/settings.json")).unwrap();
        let defaults = ForgeSettings::default();
        assert_eq!(settings.version, defaults.version);
        assert_eq!(settings.context.max_items, defaults.context.max_items);
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"engine": "unreal", "context": {"maxChars": 900}}"#,
        )
        .unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.engine, EngineKind::Unreal);
        assert_eq!(settings.context.max_chars, 900);
        assert_eq!(settings.context.max_items, 5);
    }

    #[test]
    fn load_project_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"projectPaths": {"godot": "/games/pong"}}"#,
        )
        .unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(
            settings.project_root_for(EngineKind::Godot).unwrap(),
            &PathBuf::from("/games/pong")
        );
        assert!(settings.project_root_for(EngineKind::Unity).is_none());
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result = load_settings_from_path(&path);
        assert!(matches!(result.unwrap_err(), SettingsError::Json(_)));
    }

    #[test]
    fn load_legacy_auto_backup_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"storage": {"autoBackup": false}}"#).unwrap();

        // Parsed without error; the flag itself has no effect on behavior.
        let settings = load_settings_from_path(&path).unwrap();
        assert!(!settings.storage.auto_backup);
    }

    // ── range parsing ───────────────────────────────────────────────

    #[test]
    fn parse_u64_valid() {
        assert_eq!(parse_u64_range("30000", 1000, 600_000), Some(30_000));
        assert_eq!(parse_u64_range("1000", 1000, 600_000), Some(1000));
    }

    #[test]
    fn parse_u64_out_of_range() {
        assert_eq!(parse_u64_range("500", 1000, 600_000), None);
        assert_eq!(parse_u64_range("700000", 1000, 600_000), None);
    }

    #[test]
    fn parse_u64_invalid() {
        assert_eq!(parse_u64_range("abc", 1000, 600_000), None);
    }

    #[test]
    fn parse_usize_valid() {
        assert_eq!(parse_usize_range("50", 1, 10_000), Some(50));
    }

    #[test]
    fn parse_usize_out_of_range() {
        assert_eq!(parse_usize_range("0", 1, 10_000), None);
        assert_eq!(parse_usize_range("20000", 1, 10_000), None);
    }
}

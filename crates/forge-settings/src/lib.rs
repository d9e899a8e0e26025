//! # forge-settings
//!
//! Configuration management with layered sources for the Forge assistant.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`ForgeSettings::default()`]
//! 2. **User file** — `~/.forge/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `FORGE_*` overrides (highest priority)
//!
//! The global singleton is reloadable: after the settings file is
//! rewritten, [`reload_settings_from_path`] swaps the cached value so all
//! subsequent [`get_settings`] calls return fresh data.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::path::Path;
use std::sync::{Arc, RwLock};

/// Global settings singleton.
///
/// Uses `RwLock<Option<Arc<ForgeSettings>>>` instead of `OnceLock` so the
/// cached value can be swapped after a settings update. Reads are cheap
/// (shared lock + `Arc::clone`); writes only happen on reload.
static SETTINGS: RwLock<Option<Arc<ForgeSettings>>> = RwLock::new(None);

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.forge/settings.json` with env
/// var overrides. On subsequent calls, returns the cached value. If
/// loading fails, returns compiled defaults.
pub fn get_settings() -> Arc<ForgeSettings> {
    {
        let guard = SETTINGS.read().expect("settings lock poisoned");
        if let Some(ref s) = *guard {
            return Arc::clone(s);
        }
    }

    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    // Double-check after acquiring write lock (another thread may have initialized)
    if let Some(ref s) = *guard {
        return Arc::clone(s);
    }

    let settings = Arc::new(match load_settings() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            ForgeSettings::default()
        }
    });
    *guard = Some(Arc::clone(&settings));
    settings
}

/// Initialize the global settings with a specific value.
///
/// Replaces any previously cached settings. Useful for tests and startup
/// where the settings path is known.
pub fn init_settings(settings: ForgeSettings) {
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = Some(Arc::new(settings));
}

/// Reload settings from a specific file path.
///
/// Reads the file, deep-merges over defaults, applies env overrides, and
/// swaps the global cache. All subsequent [`get_settings`] calls return
/// the new values.
pub fn reload_settings_from_path(path: &Path) {
    let new = Arc::new(match load_settings_from_path(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, ?path, "failed to reload settings, falling back to defaults");
            ForgeSettings::default()
        }
    });
    let mut guard = SETTINGS.write().expect("settings lock poisoned");
    *guard = Some(new);
    tracing::info!(?path, "settings reloaded from disk");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that mutate the global SETTINGS static must hold this lock
    /// to avoid racing with each other (Rust runs tests in parallel threads).
    static SETTINGS_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn init_then_get_returns_value() {
        let _guard = SETTINGS_MUTEX.lock().unwrap();
        let mut custom = ForgeSettings::default();
        custom.inference.model = "test-model".to_string();
        init_settings(custom);
        assert_eq!(get_settings().inference.model, "test-model");
    }

    #[test]
    fn reload_swaps_cached_value() {
        let _guard = SETTINGS_MUTEX.lock().unwrap();
        init_settings(ForgeSettings::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"inference": {"model": "reloaded"}}"#).unwrap();

        reload_settings_from_path(&path);
        assert_eq!(get_settings().inference.model, "reloaded");
    }

    #[test]
    fn reload_bad_file_falls_back_to_defaults() {
        let _guard = SETTINGS_MUTEX.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "garbage").unwrap();

        reload_settings_from_path(&path);
        assert_eq!(
            get_settings().inference.model,
            ForgeSettings::default().inference.model
        );
    }
}

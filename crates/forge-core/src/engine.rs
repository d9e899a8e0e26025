//! Target game engine identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The game engines Forge can write scripts for.
///
/// A closed set: adding an engine means adding a variant here and a
/// connector in `forge-connectors`, not modifying callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Unity (C# scripts under `Assets/Scripts`).
    Unity,
    /// Godot (GDScript under `scripts/`).
    Godot,
    /// Unreal Engine (C++ under `Source/`).
    Unreal,
}

impl EngineKind {
    /// All known engines, in display order.
    pub const ALL: [Self; 3] = [Self::Unity, Self::Godot, Self::Unreal];

    /// The source-file extension for this engine's scripts (with dot).
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Unity => ".cs",
            Self::Godot => ".gd",
            Self::Unreal => ".cpp",
        }
    }

    /// Human-readable engine name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Unity => "Unity",
            Self::Godot => "Godot",
            Self::Unreal => "Unreal Engine",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unity => write!(f, "unity"),
            Self::Godot => write!(f, "godot"),
            Self::Unreal => write!(f, "unreal"),
        }
    }
}

/// Error returned when parsing an unknown engine identifier.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine: {0}")]
pub struct UnknownEngine(pub String);

impl FromStr for EngineKind {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unity" => Ok(Self::Unity),
            "godot" => Ok(Self::Godot),
            "unreal" | "unreal_engine" | "ue" => Ok(Self::Unreal),
            other => Err(UnknownEngine(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

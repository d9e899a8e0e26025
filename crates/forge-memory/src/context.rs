//! Bounded context rendering.
//!
//! Turns project memory into the text block that prefixes every
//! generation prompt. The output is pure and deterministic: identical
//! inputs render byte-identical text, and the result never exceeds
//! `max_chars` or ends mid-word.

use std::fmt::Write as _;

use forge_core::hardware::HardwareReport;
use forge_core::text::truncate_at_word;

use crate::types::ProjectMemory;

/// Bounds on the rendered context.
#[derive(Debug, Clone, Copy)]
pub struct ContextLimits {
    /// How many of the most recent scripts to include.
    pub max_items: usize,
    /// Maximum rendered length in bytes.
    pub max_chars: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            max_items: 5,
            max_chars: 2000,
        }
    }
}

/// Render memory into a bounded context block.
///
/// Sections appear in a fixed order: project facts, the most recent
/// `max_items` scripts (insertion order), all todos, preferences, and the
/// hardware line when a report is present. Empty sections are omitted.
#[must_use]
pub fn build(
    memory: &ProjectMemory,
    hardware: Option<&HardwareReport>,
    limits: &ContextLimits,
) -> String {
    let mut out = String::new();

    out.push_str("PROJECT CONTEXT:\n");
    let name = if memory.project.name.is_empty() {
        "unnamed"
    } else {
        &memory.project.name
    };
    let _ = writeln!(out, "- Name: {name}");
    match memory.project.engine {
        Some(engine) => {
            let _ = writeln!(out, "- Engine: {}", engine.display_name());
        }
        None => out.push_str("- Engine: not set\n"),
    }
    if !memory.project.genre.is_empty() {
        let _ = writeln!(out, "- Genre: {}", memory.project.genre);
    }

    if !memory.artifacts.is_empty() {
        let _ = writeln!(out, "\nSCRIPTS ({}):", memory.artifacts.len());
        let skip = memory.artifacts.len().saturating_sub(limits.max_items);
        for artifact in memory.artifacts.iter().skip(skip) {
            let _ = writeln!(out, "  - {}: {}", artifact.logical_name, artifact.purpose);
        }
    }

    if !memory.todos.is_empty() {
        let _ = writeln!(out, "\nTODOS ({}):", memory.todos.len());
        for todo in &memory.todos {
            let _ = writeln!(out, "  - [{}] {}", todo.priority, todo.task);
        }
    }

    if !memory.preferences.is_empty() {
        out.push_str("\nPREFERENCES:\n");
        for (key, value) in &memory.preferences {
            let _ = writeln!(out, "  - {key}: {value}");
        }
    }

    if let Some(report) = hardware {
        let _ = writeln!(out, "\nHARDWARE: {}", report.summary());
    }

    truncate_at_word(&out, limits.max_chars).to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

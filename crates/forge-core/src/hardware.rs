//! Hardware capability report, consumed read-only.
//!
//! An external detection step writes `system_specs.json` into the data
//! directory. The core only reads it: the context builder includes the
//! performance tier so generated code suits the user's machine. A missing
//! or unreadable report is normal and never an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Coarse performance classification of the host machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    /// Constrained machine; recommend CPU-friendly solutions.
    Low,
    /// Typical development machine.
    Medium,
    /// High-end machine with GPU headroom.
    High,
}

impl std::fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Static hardware report produced by the external specs checker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareReport {
    /// Overall performance tier.
    pub performance_tier: PerformanceTier,
    /// Logical CPU core count.
    pub cpu_cores: u32,
    /// Total RAM in megabytes.
    pub total_ram_mb: u64,
    /// Whether a discrete GPU was detected.
    #[serde(default)]
    pub has_gpu: bool,
}

impl HardwareReport {
    /// One-line summary for inclusion in a generation context.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} tier, {} cores, {} MB RAM, {}",
            self.performance_tier,
            self.cpu_cores,
            self.total_ram_mb,
            if self.has_gpu { "GPU" } else { "no GPU" }
        )
    }
}

/// Load a hardware report from disk.
///
/// Returns `None` when the file is missing or unparsable; a bad report is
/// logged at warn level and otherwise ignored.
#[must_use]
pub fn load_report(path: &Path) -> Option<HardwareReport> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(error = %e, ?path, "failed to read hardware report");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::warn!(error = %e, ?path, "ignoring unparsable hardware report");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! The append-only action log.
//!
//! One JSON object per line, appended with an fsync so an entry that was
//! reported as written survives a crash. Reads are lazy and tolerate torn
//! trailing lines: a corrupt line yields an error item but iteration
//! continues with the next line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::entry::LogEntry;
use crate::errors::{JournalError, Result};

/// Handle to an on-disk action log file.
///
/// The file is opened per append, so multiple handles to the same path are
/// safe as long as appends are serialized by the caller.
#[derive(Debug, Clone)]
pub struct ActionLog {
    path: PathBuf,
}

impl ActionLog {
    /// Create a handle for the log at `path`.
    ///
    /// The file itself is created lazily on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry and flush it to stable storage.
    ///
    /// Creates parent directories and the file on first use. The entry is
    /// only considered recorded once `sync_all` returns.
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(entry).map_err(JournalError::Encode)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.flush()?;
        file.sync_all()?;
        debug!(target = %entry.target, action = ?entry.action, "journal entry appended");
        Ok(())
    }

    /// Lazily iterate over all entries in write order.
    ///
    /// Each item is a `Result`: corrupt lines come through as
    /// [`JournalError::Corrupt`] without stopping the iteration. A missing
    /// log file reads as empty.
    pub fn iter(&self) -> Result<impl Iterator<Item = Result<LogEntry>>> {
        let file = match File::open(&self.path) {
            Ok(f) => Some(f),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        let lines = file.map(|f| BufReader::new(f).lines());
        Ok(lines
            .into_iter()
            .flatten()
            .enumerate()
            .filter_map(|(idx, line)| match line {
                Ok(text) if text.trim().is_empty() => None,
                Ok(text) => Some(
                    serde_json::from_str(&text)
                        .map_err(|source| JournalError::Corrupt {
                            line: idx + 1,
                            source,
                        }),
                ),
                Err(e) => Some(Err(e.into())),
            }))
    }

    /// Read every decodable entry, skipping corrupt lines with a warning.
    pub fn read_all(&self) -> Result<Vec<LogEntry>> {
        let mut entries = Vec::new();
        for item in self.iter()? {
            match item {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(error = %e, path = ?self.path, "skipping corrupt journal line"),
            }
        }
        Ok(entries)
    }

    /// The number of decodable entries in the log.
    pub fn len(&self) -> Result<usize> {
        Ok(self.iter()?.filter(std::result::Result::is_ok).count())
    }

    /// Whether the log has no decodable entries.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

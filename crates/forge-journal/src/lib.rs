//! # forge-journal
//!
//! Append-only durable action log for the Forge assistant.
//!
//! Every filesystem-affecting operation is recorded as one JSON line in
//! the action log file:
//! - **Append-only** — entries are never rewritten or compacted
//! - **Durable** — each append is flushed and fsynced before it is
//!   reported as recorded
//! - **Tolerant reads** — a torn or corrupt line is surfaced per-item
//!   without hiding the rest of the history

#![deny(unsafe_code)]

pub mod entry;
pub mod errors;
pub mod log;

pub use entry::{LogAction, LogEntry, LogOutcome};
pub use errors::{JournalError, Result};
pub use log::ActionLog;

//! # forge-memory
//!
//! Durable project memory and bounded context building.
//!
//! - [`MemoryStore`] keeps what the assistant knows about the project
//!   (scripts written, todos, preferences) in one JSON file, persisted on
//!   every mutation via atomic temp-file rename
//! - loading never fails: a corrupt file degrades to a fresh store plus a
//!   [`MemoryWarning`] the UI can show
//! - [`context::build`] renders memory into the deterministic, bounded
//!   text block that prefixes generation prompts

#![deny(unsafe_code)]

pub mod context;
pub mod errors;
pub mod store;
pub mod types;

pub use context::{build as build_context, ContextLimits};
pub use errors::{MemoryError, Result};
pub use store::{MemoryStore, MemoryWarning};
pub use types::{ArtifactSummary, MemoryStats, ProjectInfo, ProjectMemory, Todo, TodoPriority};

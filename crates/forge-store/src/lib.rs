//! # forge-store
//!
//! Transactional script-file writes for the Forge assistant.
//!
//! The store sits between generated text and the project's script subtree:
//! - validates the project root before any write
//! - keeps a single `.bak` sibling backup, taken before every overwrite
//! - rolls back to the backup when a write fails partway
//! - records every outcome in the append-only action log

#![deny(unsafe_code)]

pub mod errors;
pub mod store;
pub mod types;

pub use errors::{Result, StoreError};
pub use store::ArtifactStore;
pub use types::{Project, ScriptArtifact};

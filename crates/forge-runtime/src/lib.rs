//! # forge-runtime
//!
//! Orchestration layer of the Forge assistant.
//!
//! [`Session`] owns the inference provider, artifact store, and memory,
//! and enforces the session rules: single in-flight generation, effective
//! cancellation, serialized writes per project root, and a strict
//! write-then-remember pipeline. [`assets`] holds the read-only asset
//! search URL builders.

#![deny(unsafe_code)]

pub mod assets;
pub mod errors;
pub mod session;

pub use errors::{Result, SessionError};
pub use session::{Session, SessionConfig};

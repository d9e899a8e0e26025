//! # forge-core
//!
//! Foundation types and utilities for the Forge assistant.
//!
//! This crate provides the shared vocabulary that all other Forge crates
//! depend on:
//!
//! - **Engines**: [`engine::EngineKind`] identifying the target game engine
//! - **Text**: UTF-8–safe and word-boundary truncation in [`text`]
//! - **Hardware**: [`hardware::HardwareReport`], the read-only capability
//!   report consumed by the context builder
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other forge crates.

#![deny(unsafe_code)]

pub mod engine;
pub mod hardware;
pub mod text;

//! # forge-llm
//!
//! Inference seam for the Forge assistant.
//!
//! - [`InferenceProvider`] is the backend-agnostic trait everything above
//!   this crate programs against
//! - [`OllamaProvider`] implements it over a local Ollama daemon
//! - [`prompt`] assembles role-block prompts with bounded chat history

#![deny(unsafe_code)]

pub mod errors;
pub mod ollama;
pub mod prompt;
pub mod provider;

pub use errors::{InferenceError, Result};
pub use ollama::OllamaProvider;
pub use prompt::{ChatMessage, ChatRole, DEFAULT_SYSTEM_PROMPT};
pub use provider::{pick_model, GenerateRequest, GenerateResponse, InferenceProvider};

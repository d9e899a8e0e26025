//! The provider seam.
//!
//! Everything above this crate talks to inference through
//! [`InferenceProvider`], so the runtime can be driven by the real Ollama
//! client in production and by a hand-rolled mock in tests.

use async_trait::async_trait;

use crate::errors::Result;

/// One generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The fully assembled prompt (see [`crate::prompt`]).
    pub prompt: String,
    /// Model identifier, e.g. `llama3.2:3b`.
    pub model: String,
    /// Rendered project context, prepended as its own system block.
    pub context: Option<String>,
}

/// One generation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    /// The model's text, whitespace-trimmed.
    pub text: String,
}

/// Backend-agnostic inference interface.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Run one generation to completion.
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse>;

    /// Check the service and list the models it has installed.
    async fn health(&self) -> Result<Vec<String>>;
}

/// Pick a usable model: the configured one when installed, otherwise the
/// first available.
///
/// Returns `None` when the service has no models at all.
#[must_use]
pub fn pick_model(configured: &str, available: &[String]) -> Option<String> {
    if available.iter().any(|m| m == configured) {
        return Some(configured.to_string());
    }
    let fallback = available.first()?;
    tracing::warn!(configured, fallback = %fallback, "configured model not installed, falling back");
    Some(fallback.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_configured_when_available() {
        let available = vec!["llama3.2:3b".to_string(), "qwen2.5:7b".to_string()];
        assert_eq!(
            pick_model("qwen2.5:7b", &available).as_deref(),
            Some("qwen2.5:7b")
        );
    }

    #[test]
    fn falls_back_to_first_available() {
        let available = vec!["llama3.2:3b".to_string()];
        assert_eq!(
            pick_model("missing:1b", &available).as_deref(),
            Some("llama3.2:3b")
        );
    }

    #[test]
    fn no_models_is_none() {
        assert_eq!(pick_model("anything", &[]), None);
    }
}

//! Ollama HTTP client.
//!
//! Talks to a local Ollama daemon:
//! - `POST /api/generate` with `stream: false` for one-shot generation
//! - `GET /api/tags` for health and the installed-model list
//!
//! Transport failures map to distinguishable [`InferenceError`] variants
//! so callers can tell "daemon down" from "model missing".

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{InferenceError, Result};
use crate::provider::{GenerateRequest, GenerateResponse, InferenceProvider};

const TEMPERATURE: f32 = 0.7;
const NUM_PREDICT: u32 = 2048;

/// Client for a local Ollama daemon.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl OllamaProvider {
    /// Build a client for the daemon at `base_url` with a per-request
    /// timeout of `timeout_ms`.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| InferenceError::Unreachable {
                url: base_url.clone(),
                detail: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms,
        })
    }

    fn transport_error(&self, e: &reqwest::Error) -> InferenceError {
        if e.is_timeout() {
            InferenceError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            InferenceError::Unreachable {
                url: self.base_url.clone(),
                detail: e.to_string(),
            }
        }
    }
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateReply {
    response: String,
}

#[derive(Deserialize)]
struct TagsReply {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
}

#[async_trait]
impl InferenceProvider for OllamaProvider {
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse> {
        let wire_prompt = match req.context.as_deref().filter(|c| !c.is_empty()) {
            Some(context) => format!("SYSTEM:\nContext: {context}\n\n{}", req.prompt),
            None => req.prompt.clone(),
        };
        let body = GenerateBody {
            model: &req.model,
            prompt: &wire_prompt,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
                num_predict: NUM_PREDICT,
            },
        };

        debug!(model = %req.model, prompt_bytes = wire_prompt.len(), "sending generate request");
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;
        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(InferenceError::UnknownModel(req.model.clone()));
            }
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let reply: GenerateReply = serde_json::from_str(&text)?;
        Ok(GenerateResponse {
            text: reply.response.trim().to_string(),
        })
    }

    async fn health(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;
        if !status.is_success() {
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let reply: TagsReply = serde_json::from_str(&text)?;
        Ok(reply.models.into_iter().map(|m| m.name).collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Session orchestration.
//!
//! A [`Session`] wires the inference provider, artifact store, and memory
//! together and enforces the concurrency rules:
//! - at most one generation in flight; a second request fails fast with
//!   [`SessionError::Busy`]
//! - a cancelled generation never touches the filesystem or memory, even
//!   when the response arrives after the cancel
//! - writes to one project root are serialized through one async mutex
//! - the apply pipeline runs unwrap, then the store write, then the memory
//!   record, so memory never names a file the filesystem lacks

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use forge_connectors::connector_for;
use forge_core::hardware::HardwareReport;
use forge_llm::{
    prompt, ChatMessage, ChatRole, GenerateRequest, GenerateResponse, InferenceProvider,
};
use forge_memory::{build_context, ContextLimits, MemoryStore};
use forge_store::{ArtifactStore, Project, ScriptArtifact};
use parking_lot::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::{Result, SessionError};

/// Knobs a session runs with, derived from settings at startup.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model identifier passed to the provider.
    pub model: String,
    /// System prompt for every generation.
    pub system_prompt: String,
    /// Bounds on the rendered context.
    pub limits: ContextLimits,
    /// How many chat messages to keep in a prompt.
    pub max_chat_history: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: "llama3.2:3b".to_string(),
            system_prompt: forge_llm::DEFAULT_SYSTEM_PROMPT.to_string(),
            limits: ContextLimits::default(),
            max_chat_history: 100,
        }
    }
}

/// One assistant session.
pub struct Session {
    provider: Arc<dyn InferenceProvider>,
    store: ArtifactStore,
    memory: Mutex<MemoryStore>,
    hardware: Option<HardwareReport>,
    config: SessionConfig,
    history: Mutex<Vec<ChatMessage>>,
    in_flight: AtomicBool,
    write_locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl Session {
    /// Assemble a session from its parts.
    #[must_use]
    pub fn new(
        provider: Arc<dyn InferenceProvider>,
        store: ArtifactStore,
        memory: MemoryStore,
        hardware: Option<HardwareReport>,
        config: SessionConfig,
    ) -> Self {
        Self {
            provider,
            store,
            memory: Mutex::new(memory),
            hardware,
            config,
            history: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The artifact store this session writes through.
    #[must_use]
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Exclusive access to the memory store.
    pub fn memory(&self) -> MutexGuard<'_, MemoryStore> {
        self.memory.lock()
    }

    /// Render the current bounded context block.
    #[must_use]
    pub fn context(&self) -> String {
        let memory = self.memory.lock();
        build_context(memory.memory(), self.hardware.as_ref(), &self.config.limits)
    }

    /// Run one generation.
    ///
    /// Fails fast with [`SessionError::Busy`] when another generation is in
    /// flight. On cancellation the chat history is left untouched even if
    /// the provider's response arrives afterwards.
    pub async fn generate(
        &self,
        user_message: &str,
        cancel: &CancellationToken,
    ) -> Result<GenerateResponse> {
        let _guard = self.try_begin()?;

        let context = self.context();
        let assembled = {
            let history = self.history.lock();
            prompt::assemble(
                &self.config.system_prompt,
                None,
                &history,
                user_message,
                self.config.max_chat_history,
            )
        };
        let request = GenerateRequest {
            prompt: assembled,
            model: self.config.model.clone(),
            context: Some(context),
        };

        debug!(model = %request.model, "generation started");
        let response = tokio::select! {
            () = cancel.cancelled() => return Err(SessionError::Cancelled),
            result = self.provider.generate(&request) => result?,
        };
        // The select can resolve the provider branch in the same poll that
        // delivers the cancel; the response must still be discarded.
        if cancel.is_cancelled() {
            return Err(SessionError::Cancelled);
        }

        let mut history = self.history.lock();
        history.push(ChatMessage {
            role: ChatRole::User,
            text: user_message.to_string(),
        });
        history.push(ChatMessage {
            role: ChatRole::Assistant,
            text: response.text.clone(),
        });
        Ok(response)
    }

    /// Persist a generation result as a script.
    ///
    /// Pipeline: strip transport fences, add engine boilerplate, write
    /// through the store, then record in memory. Writes to one project
    /// root are serialized.
    pub async fn apply_response(
        &self,
        project: &Project,
        logical_name: &str,
        response_text: &str,
        purpose: &str,
        cancel: &CancellationToken,
    ) -> Result<ScriptArtifact> {
        if cancel.is_cancelled() {
            return Err(SessionError::Cancelled);
        }
        let root_lock = self.write_lock_for(&project.root);
        let _write_guard = root_lock.lock().await;
        if cancel.is_cancelled() {
            return Err(SessionError::Cancelled);
        }

        let connector = connector_for(project.engine);
        let content = connector.wrap(logical_name, &connector.unwrap_content(response_text));
        let artifact = self.store.write(project, logical_name, &content, purpose)?;
        self.memory.lock().record_artifact(logical_name, purpose)?;
        info!(logical_name, path = ?artifact.resolved_path, "artifact applied");
        Ok(artifact)
    }

    fn try_begin(&self) -> Result<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(SessionError::Busy);
        }
        Ok(InFlightGuard(&self.in_flight))
    }

    fn write_lock_for(&self, root: &Path) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.write_locks.lock();
        Arc::clone(
            locks
                .entry(root.to_path_buf())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
        )
    }
}

/// Releases the in-flight slot on drop, including on error paths.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use forge_core::engine::EngineKind;
    use forge_journal::ActionLog;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    struct MockProvider {
        reply: String,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                gate: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn gated(reply: &str, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::replying(reply)
            }
        }
    }

    #[async_trait]
    impl InferenceProvider for MockProvider {
        async fn generate(
            &self,
            _req: &GenerateRequest,
        ) -> forge_llm::Result<GenerateResponse> {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(GenerateResponse {
                text: self.reply.clone(),
            })
        }

        async fn health(&self) -> forge_llm::Result<Vec<String>> {
            Ok(vec!["mock".to_string()])
        }
    }

    fn fixture(provider: MockProvider) -> (tempfile::TempDir, Arc<Session>, Project) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Assets")).unwrap();
        let store = ArtifactStore::new(ActionLog::new(dir.path().join("actions.jsonl")));
        let project = store.validate(EngineKind::Unity, dir.path()).unwrap();
        let (memory, _) = MemoryStore::load(dir.path().join("project_memory.json"));
        let session = Arc::new(Session::new(
            Arc::new(provider),
            store,
            memory,
            None,
            SessionConfig::default(),
        ));
        (dir, session, project)
    }

    #[tokio::test]
    async fn generate_appends_history() {
        let (_dir, session, _) = fixture(MockProvider::replying("here is code"));
        let cancel = CancellationToken::new();

        let response = session.generate("write pong", &cancel).await.unwrap();
        assert_eq!(response.text, "here is code");
        let history = session.history.lock();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[1].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn second_generate_is_rejected_while_busy() {
        let gate = Arc::new(Notify::new());
        let (_dir, session, _) =
            fixture(MockProvider::gated("slow reply", Arc::clone(&gate)));
        let cancel = CancellationToken::new();

        let first = {
            let session = Arc::clone(&session);
            let cancel = cancel.clone();
            tokio::spawn(async move { session.generate("first", &cancel).await })
        };
        // Let the first call claim the in-flight slot.
        tokio::task::yield_now().await;

        let err = session.generate("second", &cancel).await.unwrap_err();
        assert_matches!(err, SessionError::Busy);

        gate.notify_one();
        let response = first.await.unwrap().unwrap();
        assert_eq!(response.text, "slow reply");

        // The slot is free again after completion.
        gate.notify_one();
        let again = session.generate("third", &cancel).await.unwrap();
        assert_eq!(again.text, "slow reply");
    }

    #[tokio::test]
    async fn cancelled_generation_leaves_history_untouched() {
        let (_dir, session, _) = fixture(MockProvider::replying("late reply"));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = session.generate("write pong", &cancel).await.unwrap_err();
        assert_matches!(err, SessionError::Cancelled);
        assert!(session.history.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_generation_releases_the_slot() {
        struct FailingProvider;
        #[async_trait]
        impl InferenceProvider for FailingProvider {
            async fn generate(
                &self,
                _req: &GenerateRequest,
            ) -> forge_llm::Result<GenerateResponse> {
                Err(forge_llm::InferenceError::Timeout { timeout_ms: 1 })
            }
            async fn health(&self) -> forge_llm::Result<Vec<String>> {
                Ok(Vec::new())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Assets")).unwrap();
        let store = ArtifactStore::new(ActionLog::new(dir.path().join("actions.jsonl")));
        let (memory, _) = MemoryStore::load(dir.path().join("project_memory.json"));
        let session = Session::new(
            Arc::new(FailingProvider),
            store,
            memory,
            None,
            SessionConfig::default(),
        );
        let cancel = CancellationToken::new();

        let err = session.generate("one", &cancel).await.unwrap_err();
        assert_matches!(err, SessionError::Inference(_));
        // Not Busy: the guard was dropped on the error path.
        let err = session.generate("two", &cancel).await.unwrap_err();
        assert_matches!(err, SessionError::Inference(_));
    }

    #[tokio::test]
    async fn apply_response_runs_the_full_pipeline() {
        let (dir, session, project) = fixture(MockProvider::replying("unused"));
        let cancel = CancellationToken::new();

        let fenced = "```csharp\npublic class Player {}\n```";
        let artifact = session
            .apply_response(&project, "Player", fenced, "player movement", &cancel)
            .await
            .unwrap();

        let on_disk = std::fs::read_to_string(&artifact.resolved_path).unwrap();
        assert_eq!(on_disk, "using UnityEngine;\n\npublic class Player {}");
        assert_eq!(
            dir.path().join("Assets/Scripts/Player.cs"),
            artifact.resolved_path
        );

        let memory = session.memory();
        let recorded = memory.get_artifact("Player").unwrap();
        assert_eq!(recorded.purpose, "player movement");
    }

    #[tokio::test]
    async fn cancelled_apply_touches_nothing() {
        let (dir, session, project) = fixture(MockProvider::replying("unused"));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = session
            .apply_response(&project, "Player", "code", "purpose", &cancel)
            .await
            .unwrap_err();
        assert_matches!(err, SessionError::Cancelled);
        assert!(!dir.path().join("Assets/Scripts/Player.cs").exists());
        assert!(session.memory().memory().artifacts.is_empty());
    }

    #[tokio::test]
    async fn concurrent_applies_to_one_root_both_land() {
        let (_dir, session, project) = fixture(MockProvider::replying("unused"));
        let cancel = CancellationToken::new();

        let (a, b) = futures::join!(
            session.apply_response(&project, "Player", "v1", "movement", &cancel),
            session.apply_response(&project, "Enemy", "v2", "chasing", &cancel),
        );
        let a = a.unwrap();
        let b = b.unwrap();
        assert!(a.resolved_path.exists());
        assert!(b.resolved_path.exists());

        let entries = session.store().journal().read_all().unwrap();
        // One validate entry plus two writes.
        assert_eq!(entries.len(), 3);
    }
}

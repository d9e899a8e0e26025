//! # forge-agent
//!
//! Forge assistant CLI — wires settings, memory, the artifact store, and
//! the inference provider together.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use forge_core::engine::EngineKind;
use forge_core::hardware;
use forge_journal::ActionLog;
use forge_llm::{pick_model, InferenceProvider, OllamaProvider};
use forge_memory::{ContextLimits, MemoryStore, TodoPriority};
use forge_runtime::{assets, Session, SessionConfig};
use forge_settings::ForgeSettings;
use forge_store::{ArtifactStore, Project};

/// Forge game-dev assistant.
#[derive(Parser, Debug)]
#[command(name = "forge-agent", about = "Local game-dev assistant")]
struct Cli {
    /// Settings file (defaults to ~/.forge/settings.json).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Target engine (overrides settings).
    #[arg(long)]
    engine: Option<EngineKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show project, memory, and inference-service status.
    Status,
    /// Print the context block that would accompany a generation.
    Context,
    /// Manage the todo list.
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },
    /// Restore the last backup of a script.
    Restore {
        /// Logical script name.
        name: String,
    },
    /// Generate a script and write it into the project.
    Generate {
        /// Logical script name.
        name: String,
        /// What to ask the model for.
        prompt: String,
        /// Short purpose recorded in memory.
        #[arg(long, default_value = "")]
        purpose: String,
    },
    /// Print asset search links for a query.
    Assets {
        /// Search terms.
        query: String,
    },
}

#[derive(Subcommand, Debug)]
enum TodoAction {
    /// List pending tasks.
    List,
    /// Add a task.
    Add {
        /// The task text.
        task: String,
        /// low, medium, or high.
        #[arg(long, default_value = "medium")]
        priority: String,
    },
    /// Remove a task by its list position (0-based).
    Done {
        /// Position shown by `todo list`.
        index: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Cli::parse();

    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(forge_settings::settings_path);
    let mut settings = forge_settings::load_settings_from_path(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;
    if let Some(engine) = args.engine {
        settings.engine = engine;
    }

    // First run: the data directory and a default settings file.
    std::fs::create_dir_all(&settings.storage.data_dir).with_context(|| {
        format!(
            "failed to create data directory {}",
            settings.storage.data_dir.display()
        )
    })?;
    if !settings_path.exists() {
        write_default_settings(&settings_path)?;
    }

    match args.command {
        Command::Status => status(&settings).await,
        Command::Context => {
            println!("{}", build_session(&settings, None)?.context());
            Ok(())
        }
        Command::Todo { action } => todo(&settings, &action),
        Command::Restore { name } => restore(&settings, &name),
        Command::Generate {
            name,
            prompt,
            purpose,
        } => generate(&settings, &name, &prompt, &purpose).await,
        Command::Assets { query } => {
            for suggestion in assets::search_all(&query) {
                println!("{}\n  {}", suggestion.label, suggestion.url);
            }
            Ok(())
        }
    }
}

fn write_default_settings(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&ForgeSettings::default())?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write default settings to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default settings file");
    Ok(())
}

fn open_project(settings: &ForgeSettings, store: &ArtifactStore) -> Result<Project> {
    let root = settings
        .project_root_for(settings.engine)
        .with_context(|| {
            format!(
                "no project path configured for {} (set projectPaths.{} in settings)",
                settings.engine, settings.engine
            )
        })?;
    let project = store.validate(settings.engine, root.clone())?;
    if !project.validated {
        bail!(
            "{} does not look like a {} project",
            root.display(),
            settings.engine.display_name()
        );
    }
    Ok(project)
}

fn build_session(
    settings: &ForgeSettings,
    provider: Option<Arc<dyn InferenceProvider>>,
) -> Result<Session> {
    let store = ArtifactStore::new(ActionLog::new(settings.storage.action_log_path()));
    let (memory, warning) = MemoryStore::load(settings.storage.memory_path());
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
    }
    let hardware = hardware::load_report(&settings.storage.specs_path());

    let provider: Arc<dyn InferenceProvider> = match provider {
        Some(p) => p,
        None => Arc::new(OllamaProvider::new(
            &settings.inference.base_url,
            settings.inference.timeout_ms,
        )?),
    };
    let config = SessionConfig {
        model: settings.inference.model.clone(),
        limits: ContextLimits {
            max_items: settings.context.max_items,
            max_chars: settings.context.max_chars,
        },
        max_chat_history: settings.context.max_chat_history,
        ..SessionConfig::default()
    };
    Ok(Session::new(provider, store, memory, hardware, config))
}

async fn status(settings: &ForgeSettings) -> Result<()> {
    println!("engine: {}", settings.engine.display_name());
    match settings.project_root_for(settings.engine) {
        Some(root) => println!("project: {}", root.display()),
        None => println!("project: not configured"),
    }

    let (memory, warning) = MemoryStore::load(settings.storage.memory_path());
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
    }
    let stats = memory.stats();
    println!(
        "memory: {} scripts, {} todos, active {} days",
        stats.total_artifacts, stats.pending_todos, stats.days_active
    );

    if let Some(report) = hardware::load_report(&settings.storage.specs_path()) {
        println!("hardware: {}", report.summary());
    }

    let provider = OllamaProvider::new(&settings.inference.base_url, settings.inference.timeout_ms)?;
    match provider.health().await {
        Ok(models) => {
            println!("inference: ok ({} models)", models.len());
            match pick_model(&settings.inference.model, &models) {
                Some(model) => println!("model: {model}"),
                None => println!("model: none installed"),
            }
        }
        Err(e) => println!("inference: unavailable ({e})"),
    }
    Ok(())
}

fn todo(settings: &ForgeSettings, action: &TodoAction) -> Result<()> {
    let (mut memory, warning) = MemoryStore::load(settings.storage.memory_path());
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
    }
    match action {
        TodoAction::List => {
            for (i, todo) in memory.memory().todos.iter().enumerate() {
                println!("{i}. [{}] {}", todo.priority, todo.task);
            }
        }
        TodoAction::Add { task, priority } => {
            let priority = match priority.as_str() {
                "low" => TodoPriority::Low,
                "high" => TodoPriority::High,
                _ => TodoPriority::Medium,
            };
            memory.add_todo(task, priority)?;
            println!("added: {task}");
        }
        TodoAction::Done { index } => match memory.remove_todo(*index)? {
            Some(todo) => println!("done: {}", todo.task),
            None => bail!("no todo at index {index}"),
        },
    }
    Ok(())
}

fn restore(settings: &ForgeSettings, name: &str) -> Result<()> {
    let store = ArtifactStore::new(ActionLog::new(settings.storage.action_log_path()));
    let project = open_project(settings, &store)?;
    if store.restore_last(&project, name)? {
        println!("restored last backup of {name}");
    } else {
        println!("no backup exists for {name}");
    }
    Ok(())
}

async fn generate(settings: &ForgeSettings, name: &str, prompt: &str, purpose: &str) -> Result<()> {
    let provider = Arc::new(OllamaProvider::new(
        &settings.inference.base_url,
        settings.inference.timeout_ms,
    )?);
    let models = provider
        .health()
        .await
        .context("inference service is not reachable")?;
    let model = pick_model(&settings.inference.model, &models)
        .context("inference service has no models installed")?;

    let mut settings = settings.clone();
    settings.inference.model = model;
    let session = build_session(&settings, Some(provider))?;
    let project = open_project(&settings, session.store())?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        let _ = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    println!("generating {name}...");
    let response = session.generate(prompt, &cancel).await?;
    let artifact = session
        .apply_response(&project, name, &response.text, purpose, &cancel)
        .await?;
    println!("wrote {}", artifact.resolved_path.display());
    if let Some(backup) = artifact.backup_path {
        println!("previous version backed up to {}", backup.display());
    }
    Ok(())
}

//! Command-line front-end for the execution session.
//!
//! Thin presentation layer: it loads the persisted session, applies
//! settings toggles, optionally replaces the buffer from a file, runs
//! once, and prints the output slot. All session semantics live in
//! [`crate::session`].

use crate::backend::{Backend, RemoteBackend};
use crate::model::{RunStatus, SettingsPatch};
use crate::session::SessionController;
use crate::storage::{DiskStore, KeyValue, MemoryStore, SettingsStore, SourceStore};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "pseudolang-studio",
    version,
    about = "Edit and run PseudoLang programs against a local or remote engine"
)]
pub struct Cli {
    /// PseudoLang file to load into the session buffer before running
    pub file: Option<std::path::PathBuf>,

    /// Base URL of a remote execution server (e.g. https://run.example.com)
    #[arg(long)]
    pub server: Option<String>,

    /// Request timeout for the remote execution server
    #[arg(long, default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Use --debug true or --debug false to persist the debug-mode toggle
    #[arg(long, action = clap::ArgAction::Set)]
    pub debug: Option<bool>,

    /// Use --dark-mode true or --dark-mode false to persist the theme toggle
    #[arg(long, action = clap::ArgAction::Set)]
    pub dark_mode: Option<bool>,

    /// Print the current session buffer and exit without running
    #[arg(long)]
    pub show: bool,

    /// Keep everything in memory; persist nothing across invocations
    #[arg(long)]
    pub ephemeral: bool,
}

/// Pick the execution backend from configuration. Never inferred from
/// persisted state.
fn build_backend(args: &Cli) -> Result<Backend> {
    match args.server.as_deref() {
        Some(url) => {
            let remote = RemoteBackend::new(url, Duration::from(args.timeout))
                .context("failed to configure the execution server client")?;
            Ok(Backend::Remote(remote))
        }
        None => Err(anyhow::anyhow!(
            "no in-process engine is linked into this build; pass --server <url>"
        )),
    }
}

pub async fn run(args: Cli) -> Result<RunStatus> {
    let kv: Arc<dyn KeyValue> = if args.ephemeral {
        Arc::new(MemoryStore::default())
    } else {
        Arc::new(DiskStore::open_default()?)
    };
    let sources = SourceStore::new(kv.clone());
    let settings = SettingsStore::new(kv);

    if args.show {
        // No run, so no backend needs to be configured.
        println!("{}", sources.load());
        return Ok(RunStatus::Idle);
    }

    let controller = SessionController::new(build_backend(&args)?, sources, settings);

    if args.debug.is_some() || args.dark_mode.is_some() {
        let applied = controller.update_settings(SettingsPatch {
            debug_mode: args.debug,
            dark_mode: args.dark_mode,
        });
        info!(
            debug_mode = applied.debug_mode,
            dark_mode = applied.dark_mode,
            "settings updated"
        );
    }

    if let Some(path) = args.file.as_deref() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        controller.update_source(&text);
    }

    let status = controller.run().await;
    if let Some(version) = controller.engine_version() {
        debug!(%version, "engine");
    }

    let output = controller.snapshot().output_text;
    if output.is_empty() {
        println!("Code executed successfully!");
    } else {
        println!("{output}");
    }

    Ok(status)
}

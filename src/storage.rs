//! Durable key-value persistence for settings and the source buffer.
//!
//! Storage failures never surface to callers: loads fall back to
//! documented defaults and saves degrade to "not retained across
//! restarts", logged at warn. Editing and running must never block on
//! storage.

use crate::model::{Settings, DEFAULT_PROGRAM};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::warn;

pub(crate) const SETTINGS_KEY: &str = "settings.json";
pub(crate) const SOURCE_KEY: &str = "source.psl";

/// Narrow key-value capability backing the stores.
///
/// A `set` must be observable by a subsequent `get` in the same process.
pub trait KeyValue: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// File-per-key store rooted in the per-user data directory.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn open(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)
            .with_context(|| format!("failed to create data directory {}", root.display()))?;
        Ok(Self { root })
    }

    /// Open the store under the platform data directory.
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_dir().context("could not resolve a per-user data directory")?;
        Self::open(base.join("pseudolang-studio"))
    }
}

impl KeyValue for DiskStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.root.join(key);
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.root.join(key);
        std::fs::write(&path, value)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl MemoryStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// Settings persistence under a fixed, versionless key.
#[derive(Clone)]
pub struct SettingsStore {
    kv: Arc<dyn KeyValue>,
}

impl SettingsStore {
    pub fn new(kv: Arc<dyn KeyValue>) -> Self {
        Self { kv }
    }

    /// Load persisted settings. Never fails: missing or malformed data
    /// yields `Settings::default()`.
    pub fn load(&self) -> Settings {
        match self.kv.get(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("stored settings unreadable, using defaults: {e}");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("failed to read settings, using defaults: {e:#}");
                Settings::default()
            }
        }
    }

    /// Persist settings. Failures are logged, never raised.
    pub fn save(&self, settings: Settings) {
        let raw = match serde_json::to_string(&settings) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("failed to encode settings: {e}");
                return;
            }
        };
        if let Err(e) = self.kv.set(SETTINGS_KEY, &raw) {
            warn!("failed to persist settings: {e:#}");
        }
    }
}

/// Source buffer persistence. The full text is written on every change.
#[derive(Clone)]
pub struct SourceStore {
    kv: Arc<dyn KeyValue>,
}

impl SourceStore {
    pub fn new(kv: Arc<dyn KeyValue>) -> Self {
        Self { kv }
    }

    /// Load the last persisted source, or the default program.
    pub fn load(&self) -> String {
        match self.kv.get(SOURCE_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => DEFAULT_PROGRAM.to_string(),
            Err(e) => {
                warn!("failed to read source buffer, using default program: {e:#}");
                DEFAULT_PROGRAM.to_string()
            }
        }
    }

    /// Persist the current text. Failures are logged, never raised.
    pub fn save(&self, text: &str) {
        if let Err(e) = self.kv.set(SOURCE_KEY, text) {
            warn!("failed to persist source buffer: {e:#}");
        }
    }
}

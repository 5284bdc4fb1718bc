//! Execution session controller.
//!
//! Owns the editable source, run status, and output text of one editing
//! context, writes edits and settings through to durable storage, and
//! serializes run requests against the configured backend: at most one
//! run is ever in flight per session, and a run request received while
//! one is active is dropped, not queued.

use crate::backend::Backend;
use crate::model::{
    ExecutionRequest, RunStatus, SessionSnapshot, Settings, SettingsPatch, RUNNING_PLACEHOLDER,
};
use crate::storage::{SettingsStore, SourceStore};
use std::sync::Mutex;
use tracing::debug;

struct SessionState {
    source_text: String,
    settings: Settings,
    status: RunStatus,
    output_text: String,
}

pub struct SessionController {
    backend: Backend,
    sources: SourceStore,
    settings_store: SettingsStore,
    state: Mutex<SessionState>,
}

impl SessionController {
    /// Create a controller seeded from persisted source and settings.
    pub fn new(backend: Backend, sources: SourceStore, settings_store: SettingsStore) -> Self {
        let settings = settings_store.load();
        let source_text = sources.load();
        Self {
            backend,
            sources,
            settings_store,
            state: Mutex::new(SessionState {
                source_text,
                settings,
                status: RunStatus::Idle,
                output_text: String::new(),
            }),
        }
    }

    /// Observable state for presentation layers.
    pub fn snapshot(&self) -> SessionSnapshot {
        let st = self.lock();
        SessionSnapshot {
            source_text: st.source_text.clone(),
            status: st.status,
            output_text: st.output_text.clone(),
        }
    }

    pub fn settings(&self) -> Settings {
        self.lock().settings
    }

    /// Engine version string, for display only.
    pub fn engine_version(&self) -> Option<String> {
        self.backend.version()
    }

    /// Replace the session source and write it through to durable
    /// storage. The in-memory text is updated even if persistence fails.
    pub fn update_source(&self, text: &str) {
        let mut st = self.lock();
        st.source_text = text.to_string();
        self.sources.save(text);
    }

    /// Merge a partial settings update and write it through; visible to
    /// subsequent `run` calls immediately.
    pub fn update_settings(&self, patch: SettingsPatch) -> Settings {
        let mut st = self.lock();
        st.settings = st.settings.apply(patch);
        self.settings_store.save(st.settings);
        st.settings
    }

    /// Run the current source against the backend.
    ///
    /// Returns the terminal status of this run, or `Running` unchanged
    /// when a run was already in flight (in which case this request had
    /// no effect). Backend failures land in `Failed` with an
    /// `Error:`-prefixed output text; nothing escapes as a panic or a
    /// raised error.
    pub async fn run(&self) -> RunStatus {
        let request = {
            let mut st = self.lock();
            if st.status == RunStatus::Running {
                debug!("run request dropped: a run is already in flight");
                return RunStatus::Running;
            }
            st.status = RunStatus::Running;
            st.output_text = RUNNING_PLACEHOLDER.to_string();
            ExecutionRequest {
                source_text: st.source_text.clone(),
                debug_mode: st.settings.debug_mode,
            }
        };

        let outcome = self.backend.execute(&request).await;

        let mut st = self.lock();
        match outcome {
            Ok(output) => {
                st.status = RunStatus::Succeeded;
                st.output_text = output;
            }
            Err(e) => {
                st.status = RunStatus::Failed;
                st.output_text = format!("Error: {e}");
            }
        }
        st.status
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // Session state is plain data; a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

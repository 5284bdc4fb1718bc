//! In-process engine variant.
//!
//! The engine itself is an external artifact supplied by the host; this
//! module owns its lifecycle: setup runs at most once per process even
//! under concurrent callers, and a failed setup is retried on the next
//! call rather than poisoning the backend.

use super::{detail_or_unknown, BackendError, BackendState};
use crate::model::ExecutionRequest;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Surface the host-linked PseudoLang engine must provide.
pub trait Engine: Send + Sync + 'static {
    /// One-time setup. The adapter guarantees at most one in-flight call.
    fn initialize(&self) -> Result<()>;

    /// Run `source` and return its output. A returned error is a run
    /// failure, never a process failure.
    fn run(&self, source: &str, debug: bool) -> Result<String>;

    /// Engine version, for display only.
    fn version(&self) -> Option<String> {
        None
    }
}

/// Adapter that gates an [`Engine`] behind single-flight lazy
/// initialization.
pub struct LocalBackend {
    engine: Arc<dyn Engine>,
    // The cell is the single-flight guard: concurrent callers await the
    // same init attempt, and a failed attempt leaves it unset so the
    // next call retries.
    ready: OnceCell<()>,
    initializing: AtomicBool,
}

impl LocalBackend {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self {
            engine,
            ready: OnceCell::new(),
            initializing: AtomicBool::new(false),
        }
    }

    /// Current lifecycle state of the engine handle.
    pub fn state(&self) -> BackendState {
        if self.ready.initialized() {
            BackendState::Ready
        } else if self.initializing.load(Ordering::Acquire) {
            BackendState::Initializing
        } else {
            BackendState::Uninitialized
        }
    }

    /// Warm the engine up ahead of the first run.
    pub async fn warm_up(&self) -> Result<(), BackendError> {
        self.ensure_ready().await
    }

    pub async fn execute(&self, request: &ExecutionRequest) -> Result<String, BackendError> {
        self.ensure_ready().await?;
        self.engine
            .run(&request.source_text, request.debug_mode)
            .map_err(|e| BackendError::Runtime(detail_or_unknown(format!("{e:#}"))))
    }

    pub fn version(&self) -> Option<String> {
        self.engine.version()
    }

    async fn ensure_ready(&self) -> Result<(), BackendError> {
        self.ready
            .get_or_try_init(|| async {
                self.initializing.store(true, Ordering::Release);
                debug!("initializing engine");
                let res = self
                    .engine
                    .initialize()
                    .map_err(|e| BackendError::Setup(format!("{e:#}")));
                self.initializing.store(false, Ordering::Release);
                if res.is_ok() {
                    debug!(version = ?self.engine.version(), "engine ready");
                }
                res
            })
            .await
            .map(|_| ())
    }
}

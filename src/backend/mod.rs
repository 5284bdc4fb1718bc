//! Execution backends for submitted PseudoLang source.
//!
//! Two variants share one `execute` contract: an in-process engine behind
//! a single-flight lazy initialization, and a remote execution server.
//! Variant selection is configuration; nothing outside this module
//! branches on which one is active.

mod local;
mod remote;

pub use local::{Engine, LocalBackend};
pub use remote::RemoteBackend;

use crate::model::ExecutionRequest;
use thiserror::Error;

/// Failures surfaced by [`Backend::execute`].
///
/// None of these is fatal: the backend stays usable and a later call may
/// succeed (setup failures in particular are retried on the next call).
#[derive(Debug, Error)]
pub enum BackendError {
    /// The engine could not be initialized.
    #[error("engine setup failed: {0}")]
    Setup(String),
    /// The engine ran but reported a failure.
    #[error("{0}")]
    Runtime(String),
    /// The execution server was unreachable or returned malformed data.
    #[error("{0}")]
    Transport(String),
}

/// Lifecycle of the lazily-initialized engine handle. Monotonic under
/// success; a failed setup regresses to `Uninitialized` so the next
/// call can retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    Uninitialized,
    Initializing,
    Ready,
}

/// The configured execution backend.
pub enum Backend {
    Local(LocalBackend),
    Remote(RemoteBackend),
}

impl Backend {
    /// Run the request and return its output, initializing the engine
    /// first if needed. Never panics; every failure maps onto
    /// [`BackendError`].
    pub async fn execute(&self, request: &ExecutionRequest) -> Result<String, BackendError> {
        match self {
            Backend::Local(b) => b.execute(request).await,
            Backend::Remote(b) => b.execute(request).await,
        }
    }

    /// Engine version string, for display only.
    pub fn version(&self) -> Option<String> {
        match self {
            Backend::Local(b) => b.version(),
            Backend::Remote(_) => None,
        }
    }
}

/// Engines and servers occasionally report failures with no detail;
/// callers still get a displayable message.
pub(crate) fn detail_or_unknown(detail: String) -> String {
    if detail.trim().is_empty() {
        "An unknown error occurred while executing the code".to_string()
    } else {
        detail
    }
}

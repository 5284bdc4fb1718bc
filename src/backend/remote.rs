//! Remote execution server variant.
//!
//! Stateless: each run is one HTTP request to `{base_url}/execute` with
//! the source and debug flag as query parameters, answered by a JSON
//! body carrying an `output` field.

use super::{detail_or_unknown, BackendError};
use crate::model::ExecutionRequest;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Response body of the execution server.
#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    output: String,
}

pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("pseudolang-studio/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Setup(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn execute(&self, request: &ExecutionRequest) -> Result<String, BackendError> {
        let url = format!("{}/execute", self.base_url);
        debug!(%url, debug_mode = request.debug_mode, "submitting run to execution server");

        let response = self
            .client
            .get(&url)
            .query(&[("code", request.source_text.as_str())])
            .query(&[("debug", request.debug_mode)])
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Transport(format!(
                "execution server returned {status}"
            )));
        }

        let body: ExecuteResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Transport(detail_or_unknown(e.to_string())))?;
        Ok(body.output)
    }
}

pub mod memory_repository;
pub mod mongo_repository;
pub mod repository;

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One agent invocation, appended after the answer is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRunRecord {
    pub user_id: Option<String>,
    pub agent_id: Option<String>,
    pub input: String,
    pub output: String,
    pub timestamp: DateTime<Utc>,
}

/// One workflow generation. `workflow` is either the parsed configuration
/// or the `{error, raw_response}` fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    pub user_id: Option<String>,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub workflow: Value,
    pub timestamp: DateTime<Utc>,
}

/// Why a best-effort write did not land. Only ever logged.
#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("write failed: {0:#}")]
    Write(anyhow::Error),

    #[error("write timed out after {0}s")]
    Timeout(u64),
}

async fn persist<F>(timeout: Duration, write: F) -> Result<(), PersistError>
where
    F: Future<Output = anyhow::Result<()>>,
{
    match tokio::time::timeout(timeout, write).await {
        Ok(result) => result.map_err(PersistError::Write),
        Err(_) => Err(PersistError::Timeout(timeout.as_secs())),
    }
}

/// Await a store write without letting it affect the caller: failures and
/// timeouts are logged and dropped.
pub async fn record_best_effort<F>(timeout: Duration, what: &'static str, write: F)
where
    F: Future<Output = anyhow::Result<()>>,
{
    match persist(timeout, write).await {
        Ok(()) => tracing::debug!(record = what, "saved record"),
        Err(e) => tracing::warn!(record = what, error = %e, "failed to save record, continuing"),
    }
}

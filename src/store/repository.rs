use anyhow::Result;
use async_trait::async_trait;

use super::{AgentRunRecord, WorkflowRecord};
use crate::chatbots::Chatbot;

/// Append-only audit log plus the chatbot collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn append_agent_run(&self, record: AgentRunRecord) -> Result<()>;
    async fn append_workflow(&self, record: WorkflowRecord) -> Result<()>;
    /// Insert, or replace the chatbot with the same id.
    async fn save_chatbot(&self, chatbot: Chatbot) -> Result<()>;
    /// Newest first, optionally limited to one owner.
    async fn list_chatbots(&self, user_id: Option<&str>) -> Result<Vec<Chatbot>>;
    async fn get_chatbot(&self, id: &str) -> Result<Option<Chatbot>>;
}

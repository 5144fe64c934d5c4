use std::collections::VecDeque;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repository::RecordStore;
use super::{AgentRunRecord, WorkflowRecord};
use crate::chatbots::Chatbot;

/// Agent runs and workflows kept per log; older records are dropped first.
pub const DEFAULT_LOG_LIMIT: usize = 1000;

/// Process-local store used when no document database is configured.
/// Contents are lost on restart.
pub struct MemoryRecordStore {
    log_limit: usize,
    agent_runs: RwLock<VecDeque<AgentRunRecord>>,
    workflows: RwLock<VecDeque<WorkflowRecord>>,
    chatbots: RwLock<Vec<Chatbot>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::with_log_limit(DEFAULT_LOG_LIMIT)
    }

    pub fn with_log_limit(log_limit: usize) -> Self {
        Self {
            log_limit: log_limit.max(1),
            agent_runs: RwLock::new(VecDeque::new()),
            workflows: RwLock::new(VecDeque::new()),
            chatbots: RwLock::new(Vec::new()),
        }
    }

    #[cfg(test)]
    pub async fn agent_runs(&self) -> Vec<AgentRunRecord> {
        self.agent_runs.read().await.iter().cloned().collect()
    }

    #[cfg(test)]
    pub async fn workflows(&self) -> Vec<WorkflowRecord> {
        self.workflows.read().await.iter().cloned().collect()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded<T>(log: &mut VecDeque<T>, limit: usize, record: T) {
    while log.len() >= limit {
        log.pop_front();
    }
    log.push_back(record);
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn append_agent_run(&self, record: AgentRunRecord) -> Result<()> {
        let mut runs = self.agent_runs.write().await;
        push_bounded(&mut runs, self.log_limit, record);
        Ok(())
    }

    async fn append_workflow(&self, record: WorkflowRecord) -> Result<()> {
        let mut workflows = self.workflows.write().await;
        push_bounded(&mut workflows, self.log_limit, record);
        Ok(())
    }

    async fn save_chatbot(&self, chatbot: Chatbot) -> Result<()> {
        let mut chatbots = self.chatbots.write().await;
        match chatbots.iter_mut().find(|c| c.id == chatbot.id) {
            Some(existing) => *existing = chatbot,
            None => chatbots.push(chatbot),
        }
        Ok(())
    }

    async fn list_chatbots(&self, user_id: Option<&str>) -> Result<Vec<Chatbot>> {
        let mut list: Vec<Chatbot> = self
            .chatbots
            .read()
            .await
            .iter()
            .filter(|c| user_id.is_none() || c.user_id.as_deref() == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn get_chatbot(&self, id: &str) -> Result<Option<Chatbot>> {
        Ok(self
            .chatbots
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

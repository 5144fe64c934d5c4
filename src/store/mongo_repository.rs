use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOptions, ReplaceOptions};
use mongodb::{Client, Collection, Database};

use super::repository::RecordStore;
use super::{AgentRunRecord, WorkflowRecord};
use crate::chatbots::Chatbot;

const AGENT_RUNS: &str = "agent_runs";
const WORKFLOWS: &str = "workflows";
const CHATBOTS: &str = "chatbots";

pub struct MongoRecordStore {
    db: Database,
}

impl MongoRecordStore {
    /// Parse the URI and prepare a client. The driver connects lazily, so an
    /// unreachable server surfaces on the first write, not here.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("failed to create MongoDB client")?;
        tracing::info!(database, "document store configured");
        Ok(Self {
            db: client.database(database),
        })
    }

    fn agent_runs(&self) -> Collection<AgentRunRecord> {
        self.db.collection(AGENT_RUNS)
    }

    fn workflows(&self) -> Collection<WorkflowRecord> {
        self.db.collection(WORKFLOWS)
    }

    fn chatbots(&self) -> Collection<Chatbot> {
        self.db.collection(CHATBOTS)
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn append_agent_run(&self, record: AgentRunRecord) -> Result<()> {
        self.agent_runs()
            .insert_one(record, None)
            .await
            .context("failed to insert agent run")?;
        Ok(())
    }

    async fn append_workflow(&self, record: WorkflowRecord) -> Result<()> {
        self.workflows()
            .insert_one(record, None)
            .await
            .context("failed to insert workflow")?;
        Ok(())
    }

    async fn save_chatbot(&self, chatbot: Chatbot) -> Result<()> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.chatbots()
            .replace_one(doc! { "id": chatbot.id.as_str() }, &chatbot, options)
            .await
            .context("failed to save chatbot")?;
        Ok(())
    }

    async fn list_chatbots(&self, user_id: Option<&str>) -> Result<Vec<Chatbot>> {
        let filter = match user_id {
            Some(uid) => doc! { "userId": uid },
            None => doc! {},
        };
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();
        let cursor = self
            .chatbots()
            .find(filter, options)
            .await
            .context("failed to query chatbots")?;
        cursor
            .try_collect()
            .await
            .context("failed to read chatbots")
    }

    async fn get_chatbot(&self, id: &str) -> Result<Option<Chatbot>> {
        self.chatbots()
            .find_one(doc! { "id": id }, None)
            .await
            .context("failed to look up chatbot")
    }
}

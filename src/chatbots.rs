use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, render};
use crate::error::UpstreamError;
use crate::llm::{CompletionClient, CompletionRequest};
use crate::upstream::bounded;

pub const DEFAULT_NAME: &str = "Support Bot";
pub const DEFAULT_COLOR: &str = "#6366f1";
pub const NO_REPLY: &str = "I apologize, but I couldn't process your request. Please try again.";

const KNOWLEDGE_TEMPERATURE: f32 = 0.3;
const KNOWLEDGE_MAX_TOKENS: u32 = 1500;
const REPLY_TEMPERATURE: f32 = 0.7;
const REPLY_MAX_TOKENS: u32 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chatbot {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Knowledge as rewritten by the model; what replies are grounded on.
    pub knowledge_base: String,
    /// Knowledge exactly as the owner typed it.
    pub original_knowledge: String,
    pub color: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/chatbots`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatbotRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub knowledge_base: Option<String>,
    pub color: Option<String>,
    pub user_id: Option<String>,
}

/// Body of `POST /api/chatbots/test`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestMessageRequest {
    pub chatbot_id: Option<String>,
    pub message: Option<String>,
    pub user_id: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build a chatbot, letting the model restructure the knowledge base. An
/// empty knowledge base skips the model call.
#[tracing::instrument(skip_all)]
pub async fn create_chatbot(
    llm: &dyn CompletionClient,
    catalog: &Catalog,
    timeout: Duration,
    request: CreateChatbotRequest,
) -> Result<Chatbot, UpstreamError> {
    let name = non_empty(request.name).unwrap_or_else(|| DEFAULT_NAME.to_string());
    let description = request.description.unwrap_or_default();
    let original = request.knowledge_base.unwrap_or_default();

    let knowledge_base = if original.trim().is_empty() {
        original.clone()
    } else {
        let prompts = &catalog.chatbot_prompts;
        let completion = CompletionRequest {
            system: prompts.knowledge_system.clone(),
            user: render(
                &prompts.knowledge_user,
                &[
                    ("name", name.as_str()),
                    ("description", description.as_str()),
                    ("knowledge", original.as_str()),
                ],
            ),
            temperature: KNOWLEDGE_TEMPERATURE,
            max_tokens: KNOWLEDGE_MAX_TOKENS,
        };
        bounded(timeout, "Groq", llm.complete(&completion))
            .await?
            .unwrap_or_else(|| original.clone())
    };

    let chatbot = Chatbot {
        id: Uuid::new_v4().to_string(),
        name,
        description,
        knowledge_base,
        original_knowledge: original,
        color: non_empty(request.color).unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        user_id: request.user_id,
        created_at: Utc::now(),
    };
    tracing::info!(chatbot_id = %chatbot.id, "created chatbot");
    Ok(chatbot)
}

pub fn reply_completion(catalog: &Catalog, chatbot: Option<&Chatbot>, message: &str) -> CompletionRequest {
    let prompts = &catalog.chatbot_prompts;
    let system = match chatbot {
        Some(bot) => render(
            &prompts.reply_system,
            &[
                ("name", bot.name.as_str()),
                ("description", bot.description.as_str()),
                ("knowledge", bot.knowledge_base.as_str()),
            ],
        ),
        None => prompts.generic_reply_system.clone(),
    };
    CompletionRequest {
        system,
        user: message.to_string(),
        temperature: REPLY_TEMPERATURE,
        max_tokens: REPLY_MAX_TOKENS,
    }
}

/// Answer one test message. Unknown chatbots answer with a generic persona.
pub async fn reply(
    llm: &dyn CompletionClient,
    catalog: &Catalog,
    timeout: Duration,
    chatbot: Option<&Chatbot>,
    message: &str,
) -> Result<String, UpstreamError> {
    let completion = reply_completion(catalog, chatbot, message);
    let text = bounded(timeout, "Groq", llm.complete(&completion)).await?;
    Ok(text.unwrap_or_else(|| NO_REPLY.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot() -> Chatbot {
        Chatbot {
            id: "bot-1".into(),
            name: "Acme Helper".into(),
            description: "Answers questions about Acme.".into(),
            knowledge_base: "Refunds within 30 days.".into(),
            original_knowledge: "refunds 30 days".into(),
            color: DEFAULT_COLOR.into(),
            user_id: Some("u1".into()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reply_grounded_on_knowledge() {
        let c = reply_completion(&Catalog::default(), Some(&bot()), "Do you offer refunds?");
        assert!(c.system.contains("You are Acme Helper"));
        assert!(c.system.contains("Refunds within 30 days."));
        assert_eq!(c.user, "Do you offer refunds?");
        assert_eq!(c.max_tokens, 500);
    }

    #[test]
    fn test_reply_without_chatbot_uses_generic_persona() {
        let catalog = Catalog::default();
        let c = reply_completion(&catalog, None, "hello");
        assert_eq!(c.system, catalog.chatbot_prompts.generic_reply_system);
    }

    #[test]
    fn test_chatbot_serializes_camel_case() {
        let value = serde_json::to_value(bot()).unwrap();
        assert_eq!(value["knowledgeBase"], "Refunds within 30 days.");
        assert_eq!(value["originalKnowledge"], "refunds 30 days");
        assert_eq!(value["userId"], "u1");
        assert!(value["createdAt"].is_string());
    }
}

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppState;
use super::routes::parse_body;
use crate::chatbots::{self, Chatbot, CreateChatbotRequest, TestMessageRequest};
use crate::error::ApiError;
use crate::store::record_best_effort;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChatbotsQuery {
    user_id: Option<String>,
}

/// `GET /api/chatbots`. The list is read-only convenience data, so a store
/// failure degrades to an empty list.
pub async fn list_chatbots(
    State(state): State<AppState>,
    Query(query): Query<ListChatbotsQuery>,
) -> Json<Value> {
    let listed = tokio::time::timeout(
        state.upstream_timeout,
        state.store.list_chatbots(query.user_id.as_deref()),
    )
    .await;

    let chatbots = match listed {
        Ok(Ok(list)) => list,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "failed to list chatbots");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!("listing chatbots timed out");
            Vec::new()
        }
    };

    Json(json!({ "chatbots": chatbots }))
}

/// `POST /api/chatbots`
pub async fn create_chatbot(
    State(state): State<AppState>,
    body: Result<Json<CreateChatbotRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(body)?;

    let chatbot = chatbots::create_chatbot(
        state.llm.as_ref(),
        &state.catalog,
        state.upstream_timeout,
        request,
    )
    .await?;

    record_best_effort(
        state.upstream_timeout,
        "chatbot",
        state.store.save_chatbot(chatbot.clone()),
    )
    .await;

    Ok(Json(json!({ "chatbot": chatbot })))
}

async fn find_chatbot(state: &AppState, id: &str) -> Option<Chatbot> {
    match tokio::time::timeout(state.upstream_timeout, state.store.get_chatbot(id)).await {
        Ok(Ok(found)) => found,
        Ok(Err(e)) => {
            tracing::warn!(chatbot_id = id, error = %e, "chatbot lookup failed, answering generically");
            None
        }
        Err(_) => {
            tracing::warn!(chatbot_id = id, "chatbot lookup timed out, answering generically");
            None
        }
    }
}

/// `POST /api/chatbots/test`
pub async fn test_chatbot(
    State(state): State<AppState>,
    body: Result<Json<TestMessageRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(body)?;

    let chatbot = match request.chatbot_id.as_deref() {
        Some(id) => find_chatbot(&state, id).await,
        None => None,
    };
    tracing::info!(
        chatbot_id = ?request.chatbot_id,
        user_id = ?request.user_id,
        known = chatbot.is_some(),
        "testing chatbot"
    );

    let response = chatbots::reply(
        state.llm.as_ref(),
        &state.catalog,
        state.upstream_timeout,
        chatbot.as_ref(),
        request.message.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok(Json(json!({ "response": response })))
}

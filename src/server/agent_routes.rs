use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use serde_json::{Value, json};

use super::AppState;
use super::routes::parse_body;
use crate::agents::{self, AgentRequest};
use crate::error::ApiError;
use crate::store::{AgentRunRecord, record_best_effort};

/// `POST /api/ai-agents`
pub async fn run_agent(
    State(state): State<AppState>,
    body: Result<Json<AgentRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(body)?;

    let output = agents::run_agent(
        state.llm.as_ref(),
        &state.catalog,
        state.upstream_timeout,
        &request,
    )
    .await?;

    let record = AgentRunRecord {
        user_id: request.user_id,
        agent_id: request.agent_id,
        input: request.input.unwrap_or_default(),
        output: output.clone(),
        timestamp: Utc::now(),
    };
    record_best_effort(
        state.upstream_timeout,
        "agent_run",
        state.store.append_agent_run(record),
    )
    .await;

    Ok(Json(json!({ "output": output })))
}

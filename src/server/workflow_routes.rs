use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use serde_json::{Value, json};

use super::AppState;
use super::routes::parse_body;
use crate::error::ApiError;
use crate::store::{WorkflowRecord, record_best_effort};
use crate::workflows::{self, WorkflowRequest};

/// `POST /api/workflows`. A reply without usable JSON is still a 200; the
/// payload then carries `{error, raw_response}` instead of the config.
pub async fn generate_workflow(
    State(state): State<AppState>,
    body: Result<Json<WorkflowRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = parse_body(body)?;

    let workflow = workflows::generate_workflow(
        state.llm.as_ref(),
        &state.catalog,
        state.upstream_timeout,
        &request,
    )
    .await?;

    let record = WorkflowRecord {
        kind: request.type_label().to_string(),
        user_id: request.user_id,
        prompt: request.prompt.unwrap_or_default(),
        workflow: workflow.clone(),
        timestamp: Utc::now(),
    };
    record_best_effort(
        state.upstream_timeout,
        "workflow",
        state.store.append_workflow(record),
    )
    .await;

    Ok(Json(json!({ "workflow": workflow })))
}

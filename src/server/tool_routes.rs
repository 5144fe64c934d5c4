use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use super::AppState;
use crate::error::ApiError;
use crate::tools::aggregate;
use crate::upstream::bounded;

/// `GET /api/ai-tools`: one directory fetch, filtered and sorted. An empty
/// feed is a normal `{"tools": []}`.
#[tracing::instrument(skip_all)]
pub async fn list_tools(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let posts = bounded(
        state.upstream_timeout,
        "Product Hunt",
        state.directory.fetch_recent_posts(),
    )
    .await?;

    let tools = aggregate(posts, &state.catalog.topic_keywords);
    tracing::info!(count = tools.len(), "serving tool listings");
    Ok(Json(json!({ "tools": tools })))
}

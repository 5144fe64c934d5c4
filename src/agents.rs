use std::time::Duration;

use serde::Deserialize;

use crate::catalog::{Catalog, render};
use crate::error::UpstreamError;
use crate::llm::{CompletionClient, CompletionRequest};
use crate::upstream::bounded;

/// Substituted when the completion carries no text.
pub const NO_RESPONSE: &str = "No response generated";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;

/// Body of `POST /api/ai-agents`. Every field is optional; missing ones are
/// passed through as empty text.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    pub agent_id: Option<String>,
    pub input: Option<String>,
    pub user_id: Option<String>,
}

pub fn build_completion(catalog: &Catalog, request: &AgentRequest) -> CompletionRequest {
    let choice = catalog.agent_template(request.agent_id.as_deref());
    if choice.is_fallback() {
        tracing::info!(agent_id = ?request.agent_id, "unknown agent, using generic template");
    }
    let input = request.input.as_deref().unwrap_or_default();

    CompletionRequest {
        system: catalog.agent_system_prompt.clone(),
        user: render(choice.template(), &[("input", input)]),
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Run one agent and return its text. Only upstream failures are errors;
/// unknown agents and empty answers are handled here.
#[tracing::instrument(skip_all, fields(agent_id = ?request.agent_id))]
pub async fn run_agent(
    llm: &dyn CompletionClient,
    catalog: &Catalog,
    timeout: Duration,
    request: &AgentRequest,
) -> Result<String, UpstreamError> {
    let completion = build_completion(catalog, request);
    let output = bounded(timeout, "Groq", llm.complete(&completion)).await?;
    Ok(output.unwrap_or_else(|| NO_RESPONSE.to_string()))
}

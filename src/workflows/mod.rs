pub mod extract;

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::catalog::{Catalog, render};
use crate::error::UpstreamError;
use crate::llm::{CompletionClient, CompletionRequest};
use crate::upstream::bounded;
use extract::{RawText, extract_json_object};

pub const PARSE_FAILURE: &str = "Failed to parse workflow JSON";

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 2000;

/// Target automation platform. Anything other than `"n8n"` means Make.com.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    N8n,
    Make,
}

impl Platform {
    pub fn from_type(kind: Option<&str>) -> Self {
        match kind {
            Some("n8n") => Platform::N8n,
            _ => Platform::Make,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::N8n => "n8n",
            Platform::Make => "make",
        }
    }
}

/// Body of `POST /api/workflows`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    pub prompt: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub user_id: Option<String>,
}

impl WorkflowRequest {
    pub fn platform(&self) -> Platform {
        Platform::from_type(self.kind.as_deref())
    }

    /// The type as the caller sent it, or the platform it resolved to.
    pub fn type_label(&self) -> &str {
        self.kind.as_deref().unwrap_or(self.platform().name())
    }
}

pub fn build_completion(catalog: &Catalog, request: &WorkflowRequest) -> CompletionRequest {
    let prompt = request.prompt.as_deref().unwrap_or_default();
    CompletionRequest {
        system: catalog.workflow_system_prompt(request.platform()).to_string(),
        user: render(
            &catalog.workflow_prompts.user,
            &[("type", request.type_label()), ("input", prompt)],
        ),
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Shape the model reply into the response payload: the parsed object, or
/// `{error, raw_response}` carrying the unmodified text.
pub fn workflow_payload(text: Option<String>) -> Value {
    // No text at all is read as an empty object.
    let text = text.unwrap_or_else(|| "{}".to_string());
    match extract_json_object(&text) {
        Ok(object) => Value::Object(object),
        Err(RawText(raw)) => {
            tracing::warn!(chars = raw.len(), "workflow reply had no parseable JSON object");
            json!({ "error": PARSE_FAILURE, "raw_response": raw })
        }
    }
}

#[tracing::instrument(skip_all, fields(platform = request.platform().name()))]
pub async fn generate_workflow(
    llm: &dyn CompletionClient,
    catalog: &Catalog,
    timeout: Duration,
    request: &WorkflowRequest,
) -> Result<Value, UpstreamError> {
    let completion = build_completion(catalog, request);
    let text = bounded(timeout, "Groq", llm.complete(&completion)).await?;
    Ok(workflow_payload(text))
}

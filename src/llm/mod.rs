pub mod client;

use async_trait::async_trait;

use crate::error::UpstreamError;

/// One system + user turn sent to the chat-completion API.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue exactly one completion. `Ok(None)` means the API answered but
    /// the first choice carried no text.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, UpstreamError>;
}

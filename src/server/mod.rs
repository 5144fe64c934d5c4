pub mod agent_routes;
pub mod chatbot_routes;
pub mod middleware;
pub mod routes;
pub mod tool_routes;
pub mod workflow_routes;


use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::catalog::Catalog;
use crate::directory::DirectoryClient;
use crate::llm::CompletionClient;
use crate::store::repository::RecordStore;

/// Shared per-process state. Clients are built once at startup and only
/// ever borrowed by handlers.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn CompletionClient>,
    pub directory: Arc<dyn DirectoryClient>,
    pub store: Arc<dyn RecordStore>,
    pub catalog: Arc<Catalog>,
    /// Bound applied to every upstream call and store write.
    pub upstream_timeout: Duration,
}

pub fn create_app(state: AppState) -> Router {
    routes::build_router(state)
}

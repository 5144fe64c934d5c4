use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, Uri, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{AppState, agent_routes, chatbot_routes, middleware, tool_routes, workflow_routes};
use crate::error::ApiError;

/// The route table. Each path lists the methods it serves; every other
/// method on a known path, and every unknown path, goes to [`unmatched`].
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route(
        "/",
        get(|| async {
            Json(json!({
                "status": "ok",
            }))
        }),
    );

    // The embeddable chat widget calls the API from customer sites.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION]);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request| {
        tracing::info_span!(
            "http_request",
            method = %req.method(),
            http.uri = tracing::field::Empty,
            http.host = tracing::field::Empty,
            http.query = tracing::field::Empty,
        )
    });

    Router::new()
        .nest("/health", health_routes)
        .route(
            "/api/ai-tools",
            get(tool_routes::list_tools).fallback(unmatched),
        )
        .route(
            "/api/ai-agents",
            post(agent_routes::run_agent).fallback(unmatched),
        )
        .route(
            "/api/workflows",
            post(workflow_routes::generate_workflow).fallback(unmatched),
        )
        .route(
            "/api/chatbots",
            get(chatbot_routes::list_chatbots)
                .post(chatbot_routes::create_chatbot)
                .fallback(unmatched),
        )
        .route(
            "/api/chatbots/test",
            post(chatbot_routes::test_chatbot).fallback(unmatched),
        )
        .fallback(unmatched)
        .with_state(state)
        .layer(cors)
        .layer(axum::middleware::from_fn(middleware::strip_trailing_slash))
        .layer(axum::middleware::from_fn(
            middleware::enrich_current_span_middleware,
        ))
        .layer(trace)
}

/// PUT and DELETE are refused everywhere; any other unrouted request is a
/// plain not-found.
async fn unmatched(method: Method, uri: Uri) -> ApiError {
    if method == Method::PUT || method == Method::DELETE {
        tracing::warn!(%method, path = uri.path(), "method not allowed");
        ApiError::MethodNotAllowed
    } else {
        tracing::warn!(%method, path = uri.path(), "unhandled path");
        ApiError::NotFound
    }
}

/// Unwrap a JSON body, turning a malformed one into the flat error payload.
pub(super) fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

use axum::{
    body::Body,
    http::{Method, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::Span;

pub async fn enrich_current_span_middleware(req: Request<Body>, next: Next) -> Response {
    let uri: &Uri = req.uri();

    let host = req
        .headers()
        .get("host")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("UNKNOWN");

    let current_span = Span::current();

    current_span.record("http.uri", uri.path());
    current_span.record("http.host", host);
    if let Some(query) = uri.query() {
        current_span.record("http.query", query);
    }

    next.run(req).await
}

/// `/api/ai-tools/` → 308 to `/api/ai-tools`, query preserved. Leading
/// slashes collapse to one so the target always stays on this host. The root
/// path is left alone, and PUT/DELETE pass through to the 405 fallback.
pub async fn strip_trailing_slash(req: Request<Body>, next: Next) -> Response {
    if matches!(*req.method(), Method::PUT | Method::DELETE) {
        return next.run(req).await;
    }

    let uri = req.uri();
    let path = uri.path();

    if path.len() > 1 && path.ends_with('/') {
        let trimmed = format!("/{}", path.trim_matches('/'));
        let target = match uri.query() {
            Some(query) => format!("{trimmed}?{query}"),
            None => trimmed,
        };
        return Redirect::permanent(&target).into_response();
    }

    next.run(req).await
}

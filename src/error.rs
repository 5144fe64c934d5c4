use axum::Json;
use axum::response::{IntoResponse, Response};
use hyper::StatusCode;
use serde_json::json;

/// Failure talking to a third-party API.
#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    #[error("{service} request timed out after {secs}s")]
    Timeout { service: &'static str, secs: u64 },

    #[error("{service} request failed: {message}")]
    Transport { service: &'static str, message: String },

    #[error("{service} API error {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{0}")]
    GraphQl(String),

    #[error("{service} returned an unreadable response: {message}")]
    Decode { service: &'static str, message: String },
}

impl UpstreamError {
    pub(crate) fn from_reqwest(service: &'static str, err: reqwest::Error, secs: u64) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout { service, secs }
        } else if err.is_decode() {
            UpstreamError::Decode {
                service,
                message: err.to_string(),
            }
        } else {
            UpstreamError::Transport {
                service,
                message: err.to_string(),
            }
        }
    }
}

/// Everything a handler can fail with. Every variant renders as a flat
/// `{"error": "..."}` body.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("{0}")]
    InvalidBody(String),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(_) | ApiError::InvalidBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "API error");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_displays_service_and_secs() {
        let err = UpstreamError::Timeout {
            service: "groq",
            secs: 30,
        };
        assert_eq!(err.to_string(), "groq request timed out after 30s");
    }

    #[test]
    fn status_displays_code() {
        let err = UpstreamError::Status {
            service: "Product Hunt",
            status: 401,
            body: "unauthorized".into(),
        };
        assert_eq!(err.to_string(), "Product Hunt API error 401: unauthorized");
    }

    #[test]
    fn graphql_displays_raw_message() {
        let err = UpstreamError::GraphQl("Rate limit exceeded".into());
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn upstream_is_transparent_and_500() {
        let err: ApiError = UpstreamError::GraphQl("boom".into()).into();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn routing_errors_map_to_their_status() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NotFound.to_string(), "Not found");
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::MethodNotAllowed.to_string(), "Method not allowed");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}

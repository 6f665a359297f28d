use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Method not allowed, expected {allowed}")]
    MethodNotAllowed { allowed: &'static str },

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        details: Option<String>,
    },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details, allow) = match &self {
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string(), None, None),
            AppError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                "Invalid JSON body".to_string(),
                Some(msg.clone()),
                None,
            ),
            AppError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string(), None, None),
            AppError::MethodNotAllowed { allowed } => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed".to_string(),
                None,
                Some(*allowed),
            ),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server configuration error: {}", err),
                None,
                None,
            ),
            AppError::Upstream { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                message.clone(),
                details.clone(),
                None,
            ),
            // Never echo internals to the caller; the log line carries them.
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                None,
                None,
            ),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let mut res = (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
            }),
        )
            .into_response();

        if let Some(allowed) = allow {
            res.headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allowed));
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn method_not_allowed_sets_allow_header() {
        let res = AppError::MethodNotAllowed { allowed: "POST" }.into_response();

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()[header::ALLOW], "POST");
        let body = body_json(res).await;
        assert_eq!(body["error"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn internal_error_hides_cause() {
        let res = AppError::InternalError(anyhow::anyhow!("secret stack detail")).into_response();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn upstream_error_carries_details() {
        let res = AppError::Upstream {
            message: "API key not valid".to_string(),
            details: Some("status 400".to_string()),
        }
        .into_response();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert_eq!(body["error"], "API key not valid");
        assert_eq!(body["details"], "status 400");
    }

    #[tokio::test]
    async fn config_error_is_prefixed() {
        let res = AppError::ConfigError(anyhow::anyhow!("API key missing.")).into_response();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert_eq!(body["error"], "Server configuration error: API key missing.");
    }
}

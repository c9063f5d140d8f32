//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use structor_sandbox::SandboxError;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// An error returned by a sandbox operation.
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    /// The request body is malformed or contains invalid values.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The screenshot upload could not be stored.
    #[error("upload failed: {0}")]
    Upload(String),
}

impl GatewayError {
    fn status(&self) -> StatusCode {
        match self {
            GatewayError::Sandbox(SandboxError::InvalidOptions { .. })
            | GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Sandbox(SandboxError::UnknownMethod(_)) => StatusCode::NOT_FOUND,
            GatewayError::Sandbox(SandboxError::Transport(_)) => StatusCode::BAD_GATEWAY,
            GatewayError::Sandbox(_) | GatewayError::Upload(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({"error": true, "errors": [self.to_string()]}))).into_response()
    }
}

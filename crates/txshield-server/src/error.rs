//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use txshield_sdk::{ScorerError, SdkError};

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Pipeline error, mapped by stage
    Engine(SdkError),

    /// Body could not be read as JSON
    InvalidRequest(String),
}

impl ServerError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Engine(SdkError::Validation(_)) => StatusCode::BAD_REQUEST,
            ServerError::Engine(SdkError::EvaluationFailed(err)) => match err {
                ScorerError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                ScorerError::Unavailable(_) | ScorerError::Protocol { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                ScorerError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Pipeline stage reported to the caller
    pub fn stage(&self) -> &'static str {
        match self {
            ServerError::Engine(err) => err.stage().as_str(),
            ServerError::InvalidRequest(_) => "validation",
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Engine(err) => write!(f, "{}", err),
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let stage = self.stage();
        let error_message = self.to_string();

        if status.is_server_error() {
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(stage, "Request failed: {}", error_message);
            } else {
                tracing::warn!(stage, "Request failed: {}", error_message);
            }
        }

        let body = Json(json!({
            "success": false,
            "stage": stage,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<SdkError> for ServerError {
    fn from(err: SdkError) -> Self {
        ServerError::Engine(err)
    }
}

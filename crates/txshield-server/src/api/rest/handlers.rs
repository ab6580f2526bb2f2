//! API endpoint handlers

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        message: "Transaction routes are live".to_string(),
    })
}

/// Evaluate endpoint
#[axum::debug_handler]
pub(super) async fn evaluate(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<Value>,
) -> Result<Json<EvaluateResponse>, ServerError> {
    info!(
        "Received evaluate request with {} field(s)",
        payload.as_object().map(|o| o.len()).unwrap_or(0)
    );

    let response = state.engine.evaluate(payload).await?;

    Ok(Json(response.into()))
}

//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use txshield_sdk::DecisionEngine;

/// Create REST API router
///
/// Routes are served at the root and under `/api/transactions`.
pub fn create_router(engine: Arc<DecisionEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .merge(transaction_routes())
        .nest("/api/transactions", transaction_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/evaluate", post(evaluate))
}

//! Router creation and configuration
//!
//! Creates Axum routers for REST API endpoints.

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use formbuilder_sdk::FormWorkspace;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(workspace: FormWorkspace) -> Router {
    create_router_with_state(AppState {
        workspace: Arc::new(RwLock::new(workspace)),
    })
}

/// Create REST API router over existing shared state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/forms", get(list_forms).post(create_form))
        .route("/v1/forms/:id", get(get_form).delete(delete_form))
        .route("/v1/forms/:id/evaluate", post(evaluate_form))
        .route("/v1/validate", post(validate))
        .route("/v1/derive", post(derive))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

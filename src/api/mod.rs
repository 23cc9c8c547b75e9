//! HTTP API module
//!
//! The presentation layer's entry point: read the timer, toggle it, stop it,
//! and step the durations.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::{
    break_handler, focus_handler, health_handler, status_handler, stop_handler, toggle_handler,
};

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/toggle", post(toggle_handler))
        .route("/stop", post(stop_handler))
        .route("/focus/:direction", post(focus_handler))
        .route("/break/:direction", post(break_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

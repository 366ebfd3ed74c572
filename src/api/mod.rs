//! HTTP control surface
//!
//! Forwards presentation intents to the match timer and exposes the
//! snapshot it renders from.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start-pause", post(start_pause_handler))
        .route("/add-ten", post(add_ten_handler))
        .route("/reset", post(reset_handler))
        .route("/whistle", post(whistle_handler))
        .route("/durations", post(durations_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

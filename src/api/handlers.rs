//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::error;

use crate::state::{AppState, DurationEdit, Intent};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Dispatch an intent and wrap the outcome in an [`ApiResponse`]
async fn run_intent(
    state: &AppState,
    intent: Intent,
    applied_message: &str,
    ignored_message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(intent).await {
        Ok(result) if result.applied => {
            Ok(Json(ApiResponse::applied(applied_message.to_string(), result.snapshot)))
        }
        Ok(result) => Ok(Json(ApiResponse::ignored(ignored_message.to_string(), result.snapshot))),
        Err(e) => {
            error!("Failed to handle {} intent: {}", intent.name(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start-pause - Start, resume or pause the countdown
pub async fn start_pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Json(response) =
        run_intent(&state, Intent::StartPause, "Timer toggled", "Timer unchanged").await?;
    let message = if response.timer.running { "Timer running" } else { "Timer paused" };
    Ok(Json(ApiResponse::applied(message.to_string(), response.timer)))
}

/// Handle POST /add-ten - Add ten seconds to the current phase
pub async fn add_ten_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_intent(
        &state,
        Intent::AddTenSeconds,
        "Added 10 seconds",
        "Time can only be added during a phase",
    )
    .await
}

/// Handle POST /reset - Stop and return to idle
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_intent(&state, Intent::Reset, "Timer reset", "Timer unchanged").await
}

/// Handle POST /whistle - Blow the long whistle now
pub async fn whistle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(Intent::ManualWhistle).await {
        Ok(result) => Ok(Json(ApiResponse::applied("Whistle blown".to_string(), result.snapshot))),
        Err(e) => {
            error!("Failed to blow whistle: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /durations - Edit half, break or overtime duration
pub async fn durations_handler(
    State(state): State<Arc<AppState>>,
    Json(edit): Json<DurationEdit>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_intent(
        &state,
        Intent::EditDurations { edit },
        "Durations updated",
        "Durations can only be edited while stopped before or after a match",
    )
    .await
}

/// Handle GET /status - Current timer snapshot and server metadata
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_intent, last_intent_time) = state.get_last_intent();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_intent,
        last_intent_time,
    }))
}

/// Handle GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

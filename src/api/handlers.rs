//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, warn};

use crate::state::{Adjustment, AppState, TimerSnapshot};
use super::responses::{ApiResponse, ControlState, HealthResponse, SessionView, StatusResponse};

fn parse_adjustment(direction: &str) -> Result<Adjustment, StatusCode> {
    direction.parse().map_err(|e| {
        warn!("Rejected duration adjustment: {}", e);
        StatusCode::BAD_REQUEST
    })
}

fn adjustment_message(kind: &str, changed: bool, minutes: u32, timer: &TimerSnapshot) -> String {
    if changed {
        format!("{} duration set to {} minutes", kind, minutes)
    } else if timer.durations_locked() {
        format!("{} duration is locked while a session is active", kind)
    } else {
        format!("{} duration unchanged at {} minutes", kind, minutes)
    }
}

/// Handle POST /toggle - Play or pause the timer
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle_run() {
        Ok(timer) => {
            let message = if timer.is_running { "Timer running" } else { "Timer paused" };
            Ok(Json(ApiResponse::new(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Clear the session and restore default durations
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(timer) => Ok(Json(ApiResponse::new("Timer stopped".to_string(), timer))),
        Err(e) => {
            error!("Failed to stop timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /focus/:direction - Step the focus duration
pub async fn focus_handler(
    State(state): State<Arc<AppState>>,
    Path(direction): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let adjustment = parse_adjustment(&direction)?;

    match state.adjust_focus(adjustment) {
        Ok((changed, timer)) => {
            let message = adjustment_message("Focus", changed, timer.focus_minutes, &timer);
            Ok(Json(ApiResponse::new(message, timer)))
        }
        Err(e) => {
            error!("Failed to adjust focus duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /break/:direction - Step the break duration
pub async fn break_handler(
    State(state): State<Arc<AppState>>,
    Path(direction): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let adjustment = parse_adjustment(&direction)?;

    match state.adjust_break(adjustment) {
        Ok((changed, timer)) => {
            let message = adjustment_message("Break", changed, timer.break_minutes, &timer);
            Ok(Json(ApiResponse::new(message, timer)))
        }
        Err(e) => {
            error!("Failed to adjust break duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the timer and everything needed to render it
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        status: timer.status().as_str().to_string(),
        session: SessionView::from_snapshot(&timer),
        controls: ControlState::from_snapshot(&timer),
        progress_percent: timer.progress_percent(),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

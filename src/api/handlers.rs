//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::error;

use crate::{
    services::ALERT_SOUND_URL,
    state::{AppState, Direction, RunTransition, SessionController, StateError},
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse, TimerView};

fn adjusted(
    what: &str,
    result: Result<(bool, SessionController), StateError>,
    minutes: fn(&SessionController) -> u32,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok((changed, controller)) => {
            let message = if changed {
                format!("{} duration set to {} minutes", what, minutes(&controller))
            } else {
                format!("{} duration unchanged at {} minutes", what, minutes(&controller))
            };
            Ok(Json(ApiResponse::new(message, &controller)))
        }
        Err(e) => {
            error!("Failed to adjust {} duration: {}", what.to_lowercase(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn current(state: &AppState) -> Result<SessionController, StatusCode> {
    state.get_controller().map_err(|e| {
        error!("Failed to get timer state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle POST /increase-focus
pub async fn increase_focus_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    adjusted("Focus", state.adjust_focus(Direction::Increase), |c| c.focus_minutes)
}

/// Handle POST /decrease-focus
pub async fn decrease_focus_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    adjusted("Focus", state.adjust_focus(Direction::Decrease), |c| c.focus_minutes)
}

/// Handle POST /increase-break
pub async fn increase_break_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    adjusted("Break", state.adjust_break(Direction::Increase), |c| c.break_minutes)
}

/// Handle POST /decrease-break
pub async fn decrease_break_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    adjusted("Break", state.adjust_break(Direction::Decrease), |c| c.break_minutes)
}

/// Handle POST /play-pause - Start, pause or resume the timer
pub async fn play_pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle_run() {
        Ok((transition, controller)) => {
            let message = match transition {
                RunTransition::Started => "Focus session started",
                RunTransition::Resumed => "Timer resumed",
                RunTransition::Paused => "Timer paused",
            };
            Ok(Json(ApiResponse::new(message.to_string(), &controller)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Discard the session
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.stop() {
        Ok(controller) => Ok(Json(ApiResponse::new("Timer stopped".to_string(), &controller))),
        Err(e) => {
            error!("Failed to stop timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let controller = current(&state)?;

    let activity = match state.get_activity() {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to get activity: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(StatusResponse {
        timer: TimerView::from(&controller),
        state: controller,
        phase_changes: activity.phase_changes,
        last_phase_change: activity.last_phase_change,
        alert_sound_url: ALERT_SOUND_URL.to_string(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action: activity.last_action,
        last_action_time: activity.last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

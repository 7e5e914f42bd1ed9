//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{Phase, SessionController},
    utils::{minutes_to_duration, seconds_to_duration},
};

/// The active session as clients render it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: Phase,
    pub label: String,
    pub title: String,
    pub seconds_remaining: u32,
    pub time_remaining: String,
}

/// Everything a client needs to draw the timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub focus_duration: String,
    pub break_duration: String,
    pub running: bool,
    pub paused: bool,
    pub session: Option<SessionView>,
    pub progress_fraction: f64,
    pub progress_percent: f64,
}

impl From<&SessionController> for TimerView {
    fn from(controller: &SessionController) -> Self {
        let session = controller.session.map(|session| SessionView {
            phase: session.phase,
            label: session.phase.label().to_string(),
            title: controller.session_title().unwrap_or_default(),
            seconds_remaining: session.seconds_remaining,
            time_remaining: seconds_to_duration(session.seconds_remaining),
        });

        Self {
            focus_minutes: controller.focus_minutes,
            break_minutes: controller.break_minutes,
            focus_duration: minutes_to_duration(controller.focus_minutes),
            break_duration: minutes_to_duration(controller.break_minutes),
            running: controller.running,
            paused: controller.is_paused(),
            session,
            progress_fraction: controller.progress_fraction(),
            progress_percent: controller.progress_percent(),
        }
    }
}

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(message: String, controller: &SessionController) -> Self {
        let status = if controller.running {
            "running"
        } else if controller.session.is_some() {
            "paused"
        } else {
            "idle"
        };

        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer: controller.into(),
        }
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub state: SessionController,
    pub phase_changes: u64,
    pub last_phase_change: Option<DateTime<Utc>>,
    pub alert_sound_url: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

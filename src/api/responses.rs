//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{Phase, TimerSnapshot},
    utils::{minutes_to_duration, seconds_to_duration},
};

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a response whose status reflects the timer's current state
    pub fn new(message: String, timer: TimerSnapshot) -> Self {
        Self {
            status: timer.status().as_str().to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Text shown while a session exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    /// e.g. "Focusing for 25:00 minutes"
    pub title: String,
    /// e.g. "24:59 remaining"
    pub subtitle: String,
    pub paused: bool,
}

impl SessionView {
    pub fn from_snapshot(timer: &TimerSnapshot) -> Option<Self> {
        let session = timer.session()?;
        let phase_minutes = match session.phase {
            Phase::Focusing => timer.focus_minutes,
            Phase::OnBreak => timer.break_minutes,
        };

        Some(Self {
            title: format!("{} for {} minutes", session.phase, minutes_to_duration(phase_minutes)),
            subtitle: format!("{} remaining", seconds_to_duration(session.time_remaining_seconds)),
            paused: !timer.is_running,
        })
    }
}

/// Enabled/disabled state and labels of the timer controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// "play" while paused or idle, "pause" while running
    pub play_pause: String,
    pub stop_disabled: bool,
    pub durations_disabled: bool,
    pub focus_duration: String,
    pub break_duration: String,
}

impl ControlState {
    pub fn from_snapshot(timer: &TimerSnapshot) -> Self {
        Self {
            play_pause: if timer.is_running { "pause" } else { "play" }.to_string(),
            stop_disabled: timer.stop_disabled(),
            durations_disabled: timer.durations_locked(),
            focus_duration: minutes_to_duration(timer.focus_minutes),
            break_duration: minutes_to_duration(timer.break_minutes),
        }
    }
}

/// Full status response with everything needed to render the timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub timer: TimerSnapshot,
    pub session: Option<SessionView>,
    pub controls: ControlState,
    pub progress_percent: f64,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PomodoroTimer;

    #[test]
    fn test_idle_view() {
        let timer = PomodoroTimer::new().snapshot();
        assert!(SessionView::from_snapshot(&timer).is_none());

        let controls = ControlState::from_snapshot(&timer);
        assert_eq!(controls.play_pause, "play");
        assert!(controls.stop_disabled);
        assert!(!controls.durations_disabled);
        assert_eq!(controls.focus_duration, "25:00");
        assert_eq!(controls.break_duration, "05:00");
    }

    #[test]
    fn test_running_and_paused_view() {
        let mut timer = PomodoroTimer::new();
        timer.toggle_run();
        timer.tick();

        let view = SessionView::from_snapshot(&timer.snapshot()).unwrap();
        assert_eq!(view.title, "Focusing for 25:00 minutes");
        assert_eq!(view.subtitle, "24:59 remaining");
        assert!(!view.paused);
        assert_eq!(ControlState::from_snapshot(&timer.snapshot()).play_pause, "pause");

        timer.toggle_run();
        let view = SessionView::from_snapshot(&timer.snapshot()).unwrap();
        assert!(view.paused);
        let controls = ControlState::from_snapshot(&timer.snapshot());
        assert!(!controls.stop_disabled);
        assert!(controls.durations_disabled);
    }

    #[test]
    fn test_api_response_status() {
        let mut timer = PomodoroTimer::new();
        assert_eq!(ApiResponse::new(String::new(), timer.snapshot()).status, "idle");
        timer.toggle_run();
        assert_eq!(ApiResponse::new(String::new(), timer.snapshot()).status, "running");
        timer.toggle_run();
        assert_eq!(ApiResponse::new(String::new(), timer.snapshot()).status, "paused");
    }
}

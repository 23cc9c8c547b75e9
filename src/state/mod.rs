//! State management module
//!
//! This module contains the Pomodoro state machine and the shared state that
//! wraps it for the HTTP handlers and background tasks.

pub mod app_state;
pub mod pomodoro;
pub mod progress;

// Re-export main types
pub use app_state::AppState;
pub use pomodoro::{
    Adjustment, Phase, PhaseTransition, PomodoroTimer, Session, TickOutcome, TimerSnapshot,
    TimerStatus,
};
pub use progress::progress_percent;

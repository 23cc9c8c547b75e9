//! Pomodoro Server - A state-managed HTTP server driving a single focus/break timer
//!
//! This library provides the Pomodoro state machine, the background ticker
//! that advances it once per second, the phase-change alert, and the HTTP
//! surface a presentation layer uses to read and control the timer.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;

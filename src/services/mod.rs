//! External side effects module
//!
//! The timer itself is pure; the only outside effect is the phase-change alert.

pub mod alert;

// Re-export main items
pub use alert::{play_alert, run_alert_command, AlertSound};

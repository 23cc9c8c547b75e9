//! Background tasks module
//!
//! This module contains the tasks that run alongside the HTTP server.

pub mod alert;
pub mod ticker;

// Re-export main functions
pub use alert::alert_task;
pub use ticker::ticker_task;

//! Utility functions module
//!
//! Signal handling and the duration formatting shared by API responses.

pub mod duration;
pub mod signals;

// Re-export main functions
pub use duration::{minutes_to_duration, seconds_to_duration};
pub use signals::shutdown_signal;

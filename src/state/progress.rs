//! Progress bar computation

use super::pomodoro::Session;

/// Percentage of the active phase that has elapsed, in `[0, 100]`.
///
/// `phase_duration_seconds` is the configured length of the session's phase.
pub fn progress_percent(session: &Session, phase_duration_seconds: u32) -> f64 {
    if phase_duration_seconds == 0 {
        return 0.0;
    }

    let elapsed = phase_duration_seconds.saturating_sub(session.time_remaining_seconds);
    if elapsed == 0 {
        return 0.0;
    }
    f64::from(elapsed) / f64::from(phase_duration_seconds) * 100.0
}

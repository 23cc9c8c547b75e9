//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{Adjustment, PhaseTransition, PomodoroTimer, TickOutcome, TimerSnapshot};

/// Shared application state wrapping the single Pomodoro timer
#[derive(Debug)]
pub struct AppState {
    /// The timer state machine
    pub timer: Arc<Mutex<PomodoroTimer>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Mirrors the timer's run flag for the ticker task
    pub running_tx: watch::Sender<bool>,
    /// Phase transitions for the alert task
    pub transition_tx: broadcast::Sender<PhaseTransition>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(port: u16, host: String) -> Self {
        let (running_tx, _) = watch::channel(false);
        let (transition_tx, _) = broadcast::channel(16);

        Self {
            timer: Arc::new(Mutex::new(PomodoroTimer::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            running_tx,
            transition_tx,
        }
    }

    /// Apply a user action to the timer and publish the resulting run state
    pub fn update_timer<F, R>(&self, action: &str, updater: F) -> Result<(R, TimerSnapshot), String>
    where
        F: FnOnce(&mut PomodoroTimer) -> R,
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let result = updater(&mut timer);
        let snapshot = timer.snapshot();
        // Publish under the lock so the channel sees run states in apply order
        self.publish_running(snapshot.is_running);
        drop(timer);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok((result, snapshot))
    }

    fn publish_running(&self, running: bool) {
        let changed = self.running_tx.send_if_modified(|current| {
            if *current == running {
                false
            } else {
                *current = running;
                true
            }
        });
        if changed {
            debug!("Run state published: {}", running);
        }
    }

    /// Play or pause the timer, starting a focus session if none exists
    pub fn toggle_run(&self) -> Result<TimerSnapshot, String> {
        let (running, snapshot) = self.update_timer("toggle", |timer| timer.toggle_run())?;
        info!(
            "Timer {} ({:?}, {:?}s remaining)",
            if running { "running" } else { "paused" },
            snapshot.phase,
            snapshot.time_remaining_seconds
        );
        Ok(snapshot)
    }

    /// Stop the session and restore default durations
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        let ((), snapshot) = self.update_timer("stop", |timer| timer.reset())?;
        info!("Timer reset to defaults");
        Ok(snapshot)
    }

    /// Step the focus duration; returns whether it changed
    pub fn adjust_focus(&self, adjustment: Adjustment) -> Result<(bool, TimerSnapshot), String> {
        let action = format!("focus-{}", adjustment);
        let (changed, snapshot) = self.update_timer(&action, |timer| timer.adjust_focus(adjustment))?;
        if changed {
            info!("Focus duration set to {} minutes", snapshot.focus_minutes);
        } else {
            debug!("Focus {} ignored at {} minutes", adjustment, snapshot.focus_minutes);
        }
        Ok((changed, snapshot))
    }

    /// Step the break duration; returns whether it changed
    pub fn adjust_break(&self, adjustment: Adjustment) -> Result<(bool, TimerSnapshot), String> {
        let action = format!("break-{}", adjustment);
        let (changed, snapshot) = self.update_timer(&action, |timer| timer.adjust_break(adjustment))?;
        if changed {
            info!("Break duration set to {} minutes", snapshot.break_minutes);
        } else {
            debug!("Break {} ignored at {} minutes", adjustment, snapshot.break_minutes);
        }
        Ok((changed, snapshot))
    }

    /// Advance the countdown by one second and announce phase transitions.
    ///
    /// Re-checks the run flag under the lock, so a tick racing a pause is a no-op.
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let outcome = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?
            .tick();

        match outcome {
            TickOutcome::PhaseChanged(transition) => {
                info!(
                    "Phase changed: {} -> {} ({}s)",
                    transition.from, transition.to, transition.time_remaining_seconds
                );
                if let Err(e) = self.transition_tx.send(transition) {
                    warn!("No listener for phase transition: {}", e);
                }
            }
            TickOutcome::CountedDown(session) => {
                debug!("Tick: {} {}s remaining", session.phase, session.time_remaining_seconds);
            }
            TickOutcome::Ignored => {
                debug!("Tick ignored, timer not running");
            }
        }

        Ok(outcome)
    }

    /// Get current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|timer| timer.snapshot())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Phase, TimerStatus};

    fn test_state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string())
    }

    #[test]
    fn test_toggle_publishes_run_state() {
        let state = test_state();
        let rx = state.running_tx.subscribe();
        assert!(!*rx.borrow());

        let snapshot = state.toggle_run().unwrap();
        assert_eq!(snapshot.status(), TimerStatus::Running);
        assert!(*rx.borrow());

        state.toggle_run().unwrap();
        assert!(!*rx.borrow());
    }

    #[test]
    fn test_reset_stops_ticker() {
        let state = test_state();
        let rx = state.running_tx.subscribe();
        state.toggle_run().unwrap();

        let snapshot = state.reset().unwrap();
        assert_eq!(snapshot.status(), TimerStatus::Idle);
        assert!(!*rx.borrow());
    }

    #[test]
    fn test_tick_broadcasts_phase_transition() {
        let state = test_state();
        let mut rx = state.transition_tx.subscribe();
        state.toggle_run().unwrap();

        for _ in 0..1500 {
            state.tick().unwrap();
        }
        assert!(rx.try_recv().is_err());

        let outcome = state.tick().unwrap();
        assert!(matches!(outcome, TickOutcome::PhaseChanged(_)));

        let transition = rx.try_recv().unwrap();
        assert_eq!(transition.from, Phase::Focusing);
        assert_eq!(transition.to, Phase::OnBreak);
        assert_eq!(transition.time_remaining_seconds, 300);
    }

    #[test]
    fn test_tick_after_pause_is_ignored() {
        let state = test_state();
        state.toggle_run().unwrap();
        state.toggle_run().unwrap();

        assert_eq!(state.tick().unwrap(), TickOutcome::Ignored);
        assert_eq!(state.get_snapshot().unwrap().time_remaining_seconds, Some(1500));
    }

    #[test]
    fn test_concurrent_toggles_keep_run_state_in_sync() {
        use std::sync::Barrier;

        for _ in 0..500 {
            let state = test_state();
            let barrier = Barrier::new(4);

            std::thread::scope(|scope| {
                for _ in 0..4 {
                    scope.spawn(|| {
                        barrier.wait();
                        for _ in 0..3 {
                            state.toggle_run().unwrap();
                        }
                    });
                }
            });

            assert_eq!(*state.running_tx.borrow(), state.get_snapshot().unwrap().is_running);
        }
    }

    #[test]
    fn test_adjustments_record_last_action() {
        let state = test_state();
        let (changed, snapshot) = state.adjust_focus(Adjustment::Increase).unwrap();
        assert!(changed);
        assert_eq!(snapshot.focus_minutes, 30);

        let (last_action, last_time) = state.get_last_action();
        assert_eq!(last_action.as_deref(), Some("focus-increase"));
        assert!(last_time.is_some());

        let (changed, _) = state.adjust_break(Adjustment::Decrease).unwrap();
        assert!(changed);
        assert_eq!(state.get_last_action().0.as_deref(), Some("break-decrease"));
    }
}

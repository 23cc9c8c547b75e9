//! Pomodoro session state machine
//!
//! `PomodoroTimer` owns the run flag, the current session and both configured
//! durations. Every operation is an infallible in-memory transition; calls made
//! in the wrong state are ignored and reported back as "nothing changed".

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::progress::progress_percent;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const MIN_FOCUS_MINUTES: u32 = 5;
pub const MAX_FOCUS_MINUTES: u32 = 60;
pub const FOCUS_STEP_MINUTES: u32 = 5;

pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const MIN_BREAK_MINUTES: u32 = 1;
pub const MAX_BREAK_MINUTES: u32 = 15;
pub const BREAK_STEP_MINUTES: u32 = 1;

/// Which half of the focus/break cycle a session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Focusing")]
    Focusing,
    #[serde(rename = "On Break")]
    OnBreak,
}

impl Phase {
    /// Human readable label shown in the session title
    pub fn label(self) -> &'static str {
        match self {
            Phase::Focusing => "Focusing",
            Phase::OnBreak => "On Break",
        }
    }

    /// The phase that follows this one on expiry
    pub fn next(self) -> Self {
        match self {
            Phase::Focusing => Phase::OnBreak,
            Phase::OnBreak => Phase::Focusing,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Active phase plus its remaining countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phase: Phase,
    pub time_remaining_seconds: u32,
}

impl Session {
    pub fn new(phase: Phase, time_remaining_seconds: u32) -> Self {
        Self {
            phase,
            time_remaining_seconds,
        }
    }

    fn counted_down(self) -> Self {
        Self {
            time_remaining_seconds: self.time_remaining_seconds.saturating_sub(1),
            ..self
        }
    }
}

/// Direction of a duration adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjustment {
    Increase,
    Decrease,
}

impl Adjustment {
    fn apply(self, value: u32, step: u32, min: u32, max: u32) -> u32 {
        match self {
            Adjustment::Increase => value.saturating_add(step).min(max),
            Adjustment::Decrease => value.saturating_sub(step).max(min),
        }
    }
}

impl FromStr for Adjustment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increase" => Ok(Adjustment::Increase),
            "decrease" => Ok(Adjustment::Decrease),
            other => Err(format!("Unknown adjustment: {}", other)),
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::Increase => f.write_str("increase"),
            Adjustment::Decrease => f.write_str("decrease"),
        }
    }
}

/// Emitted once per expiry when the countdown flips phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    pub time_remaining_seconds: u32,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer not running or no session; nothing happened
    Ignored,
    /// Countdown advanced within the current phase
    CountedDown(Session),
    /// The expired phase was replaced by the next one
    PhaseChanged(PhaseTransition),
}

/// Coarse state of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

impl TimerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
        }
    }
}

/// Read-only copy of the timer handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Option<Phase>,
    pub time_remaining_seconds: Option<u32>,
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub is_running: bool,
    pub is_session_active: bool,
}

impl TimerSnapshot {
    pub fn session(&self) -> Option<Session> {
        match (self.phase, self.time_remaining_seconds) {
            (Some(phase), Some(remaining)) => Some(Session::new(phase, remaining)),
            _ => None,
        }
    }

    pub fn status(&self) -> TimerStatus {
        match (self.is_session_active, self.is_running) {
            (false, _) => TimerStatus::Idle,
            (true, true) => TimerStatus::Running,
            (true, false) => TimerStatus::Paused,
        }
    }

    /// Configured length of the active phase, if a session exists
    pub fn phase_duration_seconds(&self) -> Option<u32> {
        self.phase.map(|phase| match phase {
            Phase::Focusing => self.focus_minutes * 60,
            Phase::OnBreak => self.break_minutes * 60,
        })
    }

    pub fn progress_percent(&self) -> f64 {
        match (self.session(), self.phase_duration_seconds()) {
            (Some(session), Some(duration)) => progress_percent(&session, duration),
            _ => 0.0,
        }
    }

    /// Duration controls are locked whenever a session exists
    pub fn durations_locked(&self) -> bool {
        self.is_session_active
    }

    /// Stop is only meaningful once a session has been started
    pub fn stop_disabled(&self) -> bool {
        !self.is_session_active
    }
}

/// The single focus/break timer
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    running: bool,
    session: Option<Session>,
    focus_minutes: u32,
    break_minutes: u32,
}

impl PomodoroTimer {
    /// Create an idle timer with default durations
    pub fn new() -> Self {
        Self {
            running: false,
            session: None,
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session(&self) -> Option<Session> {
        self.session
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.session.map(|s| s.phase),
            time_remaining_seconds: self.session.map(|s| s.time_remaining_seconds),
            focus_minutes: self.focus_minutes,
            break_minutes: self.break_minutes,
            is_running: self.running,
            is_session_active: self.session.is_some(),
        }
    }

    fn phase_seconds(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focusing => self.focus_minutes * 60,
            Phase::OnBreak => self.break_minutes * 60,
        }
    }

    /// Start a new focus session when idle, or resume a paused one.
    ///
    /// Returns false if the timer was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        if self.session.is_none() {
            self.session = Some(Session::new(
                Phase::Focusing,
                self.phase_seconds(Phase::Focusing),
            ));
        }
        self.running = true;
        true
    }

    /// Flip between running and paused, creating the first session on demand.
    ///
    /// Returns the new run state.
    pub fn toggle_run(&mut self) -> bool {
        if self.running {
            self.running = false;
        } else {
            self.start();
        }
        self.running
    }

    /// Advance the countdown by one second.
    ///
    /// A session sitting at zero is replaced by the next phase at its full
    /// duration, so each expiry produces exactly one transition.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }
        let Some(current) = self.session else {
            return TickOutcome::Ignored;
        };

        if current.time_remaining_seconds > 0 {
            let next = current.counted_down();
            self.session = Some(next);
            return TickOutcome::CountedDown(next);
        }

        let phase = current.phase.next();
        let next = Session::new(phase, self.phase_seconds(phase));
        self.session = Some(next);
        TickOutcome::PhaseChanged(PhaseTransition {
            from: current.phase,
            to: phase,
            time_remaining_seconds: next.time_remaining_seconds,
        })
    }

    /// Return to idle with default durations
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Step the focus duration; ignored while a session exists or at a bound.
    ///
    /// Returns true if the duration changed.
    pub fn adjust_focus(&mut self, adjustment: Adjustment) -> bool {
        if self.session.is_some() {
            return false;
        }
        let next = adjustment.apply(
            self.focus_minutes,
            FOCUS_STEP_MINUTES,
            MIN_FOCUS_MINUTES,
            MAX_FOCUS_MINUTES,
        );
        let changed = next != self.focus_minutes;
        self.focus_minutes = next;
        changed
    }

    /// Step the break duration; ignored while a session exists or at a bound.
    ///
    /// Returns true if the duration changed.
    pub fn adjust_break(&mut self, adjustment: Adjustment) -> bool {
        if self.session.is_some() {
            return false;
        }
        let next = adjustment.apply(
            self.break_minutes,
            BREAK_STEP_MINUTES,
            MIN_BREAK_MINUTES,
            MAX_BREAK_MINUTES,
        );
        let changed = next != self.break_minutes;
        self.break_minutes = next;
        changed
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new()
    }
}

//! Session controller: the focus/break state machine
//!
//! The controller owns the duration settings, the running flag and the
//! current session. It has no clock of its own; the tick scheduler calls
//! [`SessionController::tick`] once per elapsed second while running.

use serde::{Deserialize, Serialize};

use super::session::{next_session, next_tick, Phase, Session};
use crate::utils::minutes_to_duration;

/// Allowed range and step for a duration setting, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBounds {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

impl DurationBounds {
    /// Apply one step in `direction`, or `None` when it would leave the range
    pub fn step_from(&self, current: u32, direction: Direction) -> Option<u32> {
        let next = match direction {
            Direction::Increase => current.checked_add(self.step)?,
            Direction::Decrease => current.checked_sub(self.step)?,
        };
        (self.min..=self.max).contains(&next).then_some(next)
    }

    /// Whether `value` lies in range and on the step grid
    pub fn accepts(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value) && (value - self.min) % self.step == 0
    }
}

pub const FOCUS_BOUNDS: DurationBounds = DurationBounds { min: 5, max: 60, step: 5, default: 25 };
pub const BREAK_BOUNDS: DurationBounds = DurationBounds { min: 1, max: 15, step: 1, default: 5 };

/// Direction of a duration adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

/// What a play/pause toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunTransition {
    /// Started a fresh focus session from idle
    Started,
    /// Resumed a paused session
    Resumed,
    /// Paused a running session
    Paused,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second counted down
    Counted { seconds_remaining: u32 },
    /// The phase ran out and the next one began
    PhaseChanged { from: Phase, to: Phase },
    /// No session; nothing happened
    Idle,
}

/// Focus/break timer state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionController {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub running: bool,
    pub session: Option<Session>,
}

impl SessionController {
    /// Create an idle controller with the default 25/5 durations
    pub fn new() -> Self {
        Self::with_durations(FOCUS_BOUNDS.default, BREAK_BOUNDS.default)
    }

    /// Create an idle controller with the given durations.
    ///
    /// Callers validate against [`FOCUS_BOUNDS`] and [`BREAK_BOUNDS`] first.
    pub fn with_durations(focus_minutes: u32, break_minutes: u32) -> Self {
        Self {
            focus_minutes,
            break_minutes,
            running: false,
            session: None,
        }
    }

    fn durations_locked(&self) -> bool {
        self.running || self.session.is_some()
    }

    /// Step the focus duration by 5 minutes within [5, 60].
    ///
    /// Returns `true` if the value changed. Locked while a session exists.
    pub fn adjust_focus(&mut self, direction: Direction) -> bool {
        if self.durations_locked() {
            return false;
        }
        match FOCUS_BOUNDS.step_from(self.focus_minutes, direction) {
            Some(minutes) => {
                self.focus_minutes = minutes;
                true
            }
            None => false,
        }
    }

    /// Step the break duration by 1 minute within [1, 15].
    pub fn adjust_break(&mut self, direction: Direction) -> bool {
        if self.durations_locked() {
            return false;
        }
        match BREAK_BOUNDS.step_from(self.break_minutes, direction) {
            Some(minutes) => {
                self.break_minutes = minutes;
                true
            }
            None => false,
        }
    }

    /// Flip between running and paused, starting a focus session from idle
    pub fn toggle_run(&mut self) -> RunTransition {
        self.running = !self.running;
        if !self.running {
            return RunTransition::Paused;
        }
        match self.session {
            Some(_) => RunTransition::Resumed,
            None => {
                self.session = Some(Session::new(Phase::Focusing, self.focus_minutes));
                RunTransition::Started
            }
        }
    }

    /// Discard the session and return to idle
    pub fn stop(&mut self) {
        self.session = None;
        self.running = false;
    }

    /// Advance the session by one second.
    ///
    /// An exhausted phase is replaced by the next one instead of counting.
    /// Without a session this is a no-op returning [`TickOutcome::Idle`].
    pub fn tick(&mut self) -> TickOutcome {
        let Some(session) = self.session else {
            return TickOutcome::Idle;
        };

        if session.is_exhausted() {
            let next = next_session(session, self.focus_minutes, self.break_minutes);
            self.session = Some(next);
            return TickOutcome::PhaseChanged { from: session.phase, to: next.phase };
        }

        let next = next_tick(session);
        self.session = Some(next);
        TickOutcome::Counted { seconds_remaining: next.seconds_remaining }
    }

    pub fn phase(&self) -> Option<Phase> {
        self.session.map(|s| s.phase)
    }

    pub fn phase_label(&self) -> Option<&'static str> {
        self.phase().map(|p| p.label())
    }

    pub fn seconds_remaining(&self) -> Option<u32> {
        self.session.map(|s| s.seconds_remaining)
    }

    /// A session exists but the countdown is not running
    pub fn is_paused(&self) -> bool {
        self.session.is_some() && !self.running
    }

    /// Configured length of `phase` in minutes
    pub fn phase_minutes(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focusing => self.focus_minutes,
            Phase::OnBreak => self.break_minutes,
        }
    }

    /// Total seconds of the current phase, or 0 when idle
    pub fn phase_total_seconds(&self) -> u32 {
        self.phase().map_or(0, |p| self.phase_minutes(p) * 60)
    }

    /// Elapsed fraction of the current phase in [0, 1]; 0 when idle
    pub fn progress_fraction(&self) -> f64 {
        let Some(session) = self.session else {
            return 0.0;
        };
        let total = self.phase_total_seconds();
        if total == 0 {
            return 0.0;
        }
        let fraction = 1.0 - f64::from(session.seconds_remaining) / f64::from(total);
        fraction.clamp(0.0, 1.0)
    }

    /// Elapsed percentage of the current phase, for progress bars
    pub fn progress_percent(&self) -> f64 {
        self.progress_fraction() * 100.0
    }

    /// Heading such as "Focusing for 25:00 minutes"
    pub fn session_title(&self) -> Option<String> {
        self.phase().map(|phase| {
            format!(
                "{} for {} minutes",
                phase.label(),
                minutes_to_duration(self.phase_minutes(phase))
            )
        })
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

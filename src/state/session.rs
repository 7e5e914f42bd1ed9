//! Session and phase types for the focus/break countdown

use serde::{Deserialize, Serialize};

/// The kind of activity the current session represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Focusing,
    OnBreak,
}

impl Phase {
    /// Human-readable label shown by clients
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focusing => "Focusing",
            Phase::OnBreak => "On Break",
        }
    }

    /// The phase that follows this one
    pub fn next(&self) -> Phase {
        match self {
            Phase::Focusing => Phase::OnBreak,
            Phase::OnBreak => Phase::Focusing,
        }
    }
}

/// An active countdown with a phase and remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phase: Phase,
    pub seconds_remaining: u32,
}

impl Session {
    /// A fresh session for `phase` lasting `minutes`
    pub fn new(phase: Phase, minutes: u32) -> Self {
        Self {
            phase,
            seconds_remaining: minutes * 60,
        }
    }

    /// Whether the countdown for this phase has run out
    pub fn is_exhausted(&self) -> bool {
        self.seconds_remaining == 0
    }
}

/// Derive the session one second later, floored at zero
pub fn next_tick(session: Session) -> Session {
    Session {
        seconds_remaining: session.seconds_remaining.saturating_sub(1),
        ..session
    }
}

/// Derive the session that replaces an exhausted one
pub fn next_session(session: Session, focus_minutes: u32, break_minutes: u32) -> Session {
    match session.phase.next() {
        Phase::Focusing => Session::new(Phase::Focusing, focus_minutes),
        Phase::OnBreak => Session::new(Phase::OnBreak, break_minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_tick_floors_at_zero() {
        let session = Session { phase: Phase::Focusing, seconds_remaining: 1 };
        let once = next_tick(session);
        assert_eq!(once.seconds_remaining, 0);
        assert_eq!(next_tick(once).seconds_remaining, 0);
        assert_eq!(once.phase, Phase::Focusing);
    }

    #[test]
    fn next_session_alternates_phases() {
        let focusing = Session::new(Phase::Focusing, 25);
        let on_break = next_session(focusing, 25, 5);
        assert_eq!(on_break, Session { phase: Phase::OnBreak, seconds_remaining: 300 });

        let back = next_session(on_break, 30, 5);
        assert_eq!(back, Session { phase: Phase::Focusing, seconds_remaining: 1800 });
    }

    #[test]
    fn labels_match_display_text() {
        assert_eq!(Phase::Focusing.label(), "Focusing");
        assert_eq!(Phase::OnBreak.label(), "On Break");
    }
}

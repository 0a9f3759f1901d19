//! Match lifecycle state machine.
//!
//! # State Diagram
//!
//! ```text
//! ┌─────────┐   start    ┌─────────┐  end   ┌───────┐
//! │ Waiting │───────────▶│ Running │───────▶│ Ended │
//! └────┬────┘            └────┬────┘        └───────┘
//!      │ withdraw             │ withdraw
//!      │                      ▼
//!      │               ┌───────────┐
//!      └──────────────▶│ Withdrawn │
//!                      └───────────┘
//! ```
//!
//! `Ended` and `Withdrawn` are terminal. A match leaves them only by being
//! reset, which replaces the machine with a fresh `Waiting` one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// No players yet, board frozen
    #[default]
    Waiting,
    /// Moves accepted
    Running,
    /// Decided, winner set
    Ended,
    /// Opponent left, no winner
    Withdrawn,
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Ended => "ended",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Check if moves can be applied.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Check if match is terminal (only reset leaves it).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::Withdrawn)
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle transition events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Start,
    End,
    Withdraw,
}

/// Error when a lifecycle transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: MatchPhase,
    pub event: PhaseEvent,
    pub reason: &'static str,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} via {:?}: {}",
            self.from, self.event, self.reason
        )
    }
}

impl std::error::Error for InvalidTransition {}

/// Lifecycle state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseMachine {
    phase: MatchPhase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Apply an event, returning the new machine or an error.
    pub fn apply(&self, event: PhaseEvent) -> Result<Self, InvalidTransition> {
        Ok(Self {
            phase: self.transition(event)?,
        })
    }

    /// Apply an event in place, returning error if invalid.
    pub fn apply_mut(&mut self, event: PhaseEvent) -> Result<(), InvalidTransition> {
        self.phase = self.transition(event)?;
        Ok(())
    }

    fn transition(&self, event: PhaseEvent) -> Result<MatchPhase, InvalidTransition> {
        use MatchPhase::*;
        use PhaseEvent::*;

        let invalid = |reason: &'static str| InvalidTransition {
            from: self.phase,
            event,
            reason,
        };

        match (self.phase, event) {
            (Waiting, Start) => Ok(Running),
            (_, Start) => Err(invalid("Match already started")),

            (Running, End) => Ok(Ended),
            (_, End) => Err(invalid("Match is not running")),

            (Waiting | Running, Withdraw) => Ok(Withdrawn),
            (_, Withdraw) => Err(invalid("Match is already over")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase() {
        let machine = PhaseMachine::new();
        assert_eq!(machine.phase(), MatchPhase::Waiting);
        assert!(!machine.phase().is_running());
    }

    #[test]
    fn test_full_match_flow() {
        let mut machine = PhaseMachine::new();

        machine.apply_mut(PhaseEvent::Start).unwrap();
        assert!(machine.phase().is_running());

        machine.apply_mut(PhaseEvent::End).unwrap();
        assert_eq!(machine.phase(), MatchPhase::Ended);
        assert!(machine.phase().is_terminal());

        machine = PhaseMachine::new();
        assert_eq!(machine.phase(), MatchPhase::Waiting);
    }

    #[test]
    fn test_withdraw_from_waiting_and_running() {
        let waiting = PhaseMachine::new();
        assert_eq!(
            waiting.apply(PhaseEvent::Withdraw).unwrap().phase(),
            MatchPhase::Withdrawn
        );

        let running = waiting.apply(PhaseEvent::Start).unwrap();
        assert_eq!(
            running.apply(PhaseEvent::Withdraw).unwrap().phase(),
            MatchPhase::Withdrawn
        );
    }

    #[test]
    fn test_invalid_transitions() {
        let machine = PhaseMachine::new();

        // Can't end before starting
        assert!(machine.apply(PhaseEvent::End).is_err());

        // Can't start twice
        let running = machine.apply(PhaseEvent::Start).unwrap();
        assert!(running.apply(PhaseEvent::Start).is_err());

        // Nothing but reset leaves a terminal phase
        let ended = running.apply(PhaseEvent::End).unwrap();
        assert!(ended.apply(PhaseEvent::Withdraw).is_err());
        assert!(ended.apply(PhaseEvent::Start).is_err());

        let withdrawn = running.apply(PhaseEvent::Withdraw).unwrap();
        let err = withdrawn.apply(PhaseEvent::Withdraw).unwrap_err();
        assert_eq!(err.from, MatchPhase::Withdrawn);
        assert_eq!(err.reason, "Match is already over");
    }

    #[test]
    fn test_display() {
        let err = InvalidTransition {
            from: MatchPhase::Ended,
            event: PhaseEvent::Start,
            reason: "Match already started",
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition from ended via Start: Match already started"
        );
    }
}

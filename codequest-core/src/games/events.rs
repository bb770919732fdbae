use crate::games::GamePhase;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tone of an inline feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
}

/// Inline, auto-clearing message shown inside a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn new(kind: FeedbackKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

/// Events emitted by a game session while handling input or timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The state machine moved to another phase
    PhaseChanged { from: GamePhase, to: GamePhase },

    /// Score counter changed
    ScoreChanged { score: u32 },

    /// Move counter changed (pairs memory)
    MovesChanged { moves: u32 },

    /// One countdown step elapsed (timed match)
    Countdown { remaining_secs: u32 },

    /// Playback highlight moved (sequence recall); `None` hides it
    Highlight { pad: Option<usize> },

    /// A new level started (sequence recall)
    LevelChanged { level: u32 },

    /// Inline message shown
    Feedback { feedback: Feedback },

    /// Inline message expired
    FeedbackCleared,

    /// Session returned to its initial phase
    Reset,

    /// The game was won. Emitted at most once per mounted session.
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{GamePhase, TimedMatchPhase};

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = GameEvent::ScoreChanged { score: 3 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ScoreChanged");
        assert_eq!(json["score"], 3);
    }

    #[test]
    fn test_phase_change_debug() {
        let event = GameEvent::PhaseChanged {
            from: GamePhase::TimedMatch(TimedMatchPhase::Idle),
            to: GamePhase::TimedMatch(TimedMatchPhase::Running),
        };
        let debug = format!("{:?}", event);
        assert!(debug.contains("Running"));
    }

    #[test]
    fn test_feedback_kind() {
        assert!(Feedback::new(FeedbackKind::Error, "boom").is_error());
        assert!(!Feedback::new(FeedbackKind::Success, "yay").is_error());
    }
}

use crate::domain::{ActivityId, XpAwardRequest};
use crate::games::GameEvent;
use uuid::Uuid;

/// Events emitted by the activities loop
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityEvent {
    /// A dialog opened and its game was mounted
    ActivityOpened {
        activity_id: ActivityId,
        session_id: Uuid,
    },

    /// The dialog closed and its game was disposed
    ActivityClosed {
        activity_id: ActivityId,
        session_id: Uuid,
        cancelled_timers: usize,
    },

    /// Something happened inside the open game
    Game {
        activity_id: ActivityId,
        event: GameEvent,
    },

    /// First completion of an activity was recorded
    ActivityCompleted {
        activity_id: ActivityId,
        points: u32,
        total_points: u64,
        completed_count: usize,
    },

    /// XP should be credited by the reward store
    AwardRequested { request: XpAwardRequest },

    /// Transient celebration banner
    Celebrate {
        activity_id: ActivityId,
        title: String,
        points: u32,
    },

    /// Command failed
    CommandFailed { command: String, reason: String },
}

impl ActivityEvent {
    /// The award carried by this event, if any
    pub fn award(&self) -> Option<XpAwardRequest> {
        match self {
            ActivityEvent::AwardRequested { request } => Some(*request),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_clone() {
        let event = ActivityEvent::ActivityOpened {
            activity_id: 2,
            session_id: Uuid::new_v4(),
        };
        assert_eq!(event.clone(), event);
    }

    #[test]
    fn test_award_extraction() {
        let request = XpAwardRequest {
            activity_id: 1,
            points: 10,
        };
        assert_eq!(
            ActivityEvent::AwardRequested { request }.award(),
            Some(request)
        );
        assert_eq!(
            ActivityEvent::CommandFailed {
                command: "Input".to_string(),
                reason: "No activity is open".to_string(),
            }
            .award(),
            None
        );
    }
}

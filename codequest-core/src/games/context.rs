use crate::config::GameTimings;
use crate::games::timers::{TimerKind, TimerQueue, TimerToken};
use crate::games::{Feedback, FeedbackKind, GameEvent};
use rand::rngs::StdRng;

/// Everything a game template may touch while handling one event.
///
/// Borrowed from the owning [`GameSession`](crate::games::GameSession) for
/// the duration of a single input, timer or reset.
pub struct GameContext<'a> {
    now_ms: u64,
    timers: &'a mut TimerQueue,
    rng: &'a mut StdRng,
    timings: &'a GameTimings,
    events: &'a mut Vec<GameEvent>,
}

impl<'a> GameContext<'a> {
    pub fn new(
        now_ms: u64,
        timers: &'a mut TimerQueue,
        rng: &'a mut StdRng,
        timings: &'a GameTimings,
        events: &'a mut Vec<GameEvent>,
    ) -> Self {
        Self {
            now_ms,
            timers,
            rng,
            timings,
            events,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn timings(&self) -> &GameTimings {
        self.timings
    }

    pub fn rng(&mut self) -> &mut StdRng {
        self.rng
    }

    /// Schedule a transition `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, kind: TimerKind) -> TimerToken {
        self.timers
            .schedule(self.now_ms.saturating_add(delay_ms), kind)
    }

    pub fn cancel(&mut self, kind: TimerKind) -> usize {
        self.timers.cancel_kind(kind)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Show an inline message; replaces any message still visible
    pub fn feedback(&mut self, kind: FeedbackKind, message: impl Into<String>) {
        self.timers.cancel_kind(TimerKind::ClearFeedback);
        let delay = self.timings.feedback_clear_ms;
        self.schedule(delay, TimerKind::ClearFeedback);
        self.emit(GameEvent::Feedback {
            feedback: Feedback::new(kind, message),
        });
    }

    /// Request completion. The session drops repeats.
    pub fn complete(&mut self) {
        self.emit(GameEvent::Completed);
    }
}

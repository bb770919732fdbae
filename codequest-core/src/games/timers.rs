use serde::{Deserialize, Serialize};

/// What a scheduled transition does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Timed match: one countdown step
    Countdown,
    /// Sequence recall: reveal the next element of the playback
    RevealStep,
    /// Sequence recall: start the next level after a solved one
    NextLevel,
    /// Pairs memory: turn a mismatched pair face down
    FlipBack,
    /// Session: hide the current feedback message
    ClearFeedback,
}

/// Cancellation token for a scheduled transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub token: TimerToken,
    pub due_at: u64,
    pub kind: TimerKind,
}

/// Pending transitions of one game session, on a logical millisecond clock
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_token: u64,
    pending: Vec<ScheduledTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `due_at`
    pub fn schedule(&mut self, due_at: u64, kind: TimerKind) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.push(ScheduledTimer {
            token,
            due_at,
            kind,
        });
        token
    }

    /// Revoke a single timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.token != token);
        self.pending.len() != before
    }

    /// Revoke every timer of one kind
    pub fn cancel_kind(&mut self, kind: TimerKind) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.kind != kind);
        before - self.pending.len()
    }

    /// Revoke everything
    pub fn clear(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Remove and return the earliest timer due at or before `now`.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: u64) -> Option<ScheduledTimer> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= now)
            .min_by_key(|(_, t)| (t.due_at, t.token))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(index))
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|t| t.due_at).min()
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

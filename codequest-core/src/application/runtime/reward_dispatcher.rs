use crate::application::ActivityEvent;
use crate::domain::XpAwardRequest;
use crate::traits::{RewardError, RewardStore, XpReceipt};
use std::cell::{Cell, RefCell};

/// Result of sending one award to the reward store
#[derive(Debug, Clone, PartialEq)]
pub enum AwardOutcome {
    Awarded {
        request: XpAwardRequest,
        receipt: XpReceipt,
    },
    Failed {
        request: XpAwardRequest,
        error: RewardError,
    },
}

impl AwardOutcome {
    pub fn is_awarded(&self) -> bool {
        matches!(self, AwardOutcome::Awarded { .. })
    }
}

/// The one place where award requests meet the reward store.
///
/// Failures are logged and kept for an explicit [`retry_failed`]; the
/// completion that caused them is never rolled back.
///
/// [`retry_failed`]: RewardDispatcher::retry_failed
pub struct RewardDispatcher<S: RewardStore> {
    store: S,
    failed: RefCell<Vec<XpAwardRequest>>,
    awarded_points: Cell<u64>,
}

impl<S: RewardStore> RewardDispatcher<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            failed: RefCell::new(Vec::new()),
            awarded_points: Cell::new(0),
        }
    }

    /// Send one award
    pub async fn dispatch(&self, request: XpAwardRequest) -> AwardOutcome {
        match self.store.update_xp(request.points).await {
            Ok(receipt) => {
                self.awarded_points
                    .set(self.awarded_points.get() + u64::from(receipt.points));
                match receipt.total_xp {
                    Some(total) => tracing::info!(
                        "✨ Awarded {} XP for activity {} (total {})",
                        receipt.points,
                        request.activity_id,
                        total
                    ),
                    None => tracing::info!(
                        "✨ Awarded {} XP for activity {}",
                        receipt.points,
                        request.activity_id
                    ),
                }
                AwardOutcome::Awarded { request, receipt }
            }
            Err(error) => {
                tracing::warn!(
                    "⚠️ Failed to award {} XP for activity {}: {}",
                    request.points,
                    request.activity_id,
                    error
                );
                self.failed.borrow_mut().push(request);
                AwardOutcome::Failed { request, error }
            }
        }
    }

    /// Send every award found in a batch of loop events, in order
    pub async fn dispatch_events(&self, events: &[ActivityEvent]) -> Vec<AwardOutcome> {
        let mut outcomes = Vec::new();
        for request in events.iter().filter_map(ActivityEvent::award) {
            outcomes.push(self.dispatch(request).await);
        }
        outcomes
    }

    /// Resubmit every failed award once. Awards that fail again stay in
    /// the ledger.
    pub async fn retry_failed(&self) -> Vec<AwardOutcome> {
        let pending = std::mem::take(&mut *self.failed.borrow_mut());
        if !pending.is_empty() {
            tracing::info!("🔁 Retrying {} failed awards", pending.len());
        }

        let mut outcomes = Vec::with_capacity(pending.len());
        for request in pending {
            outcomes.push(self.dispatch(request).await);
        }
        outcomes
    }

    /// Awards waiting for a retry
    pub fn failed(&self) -> Vec<XpAwardRequest> {
        self.failed.borrow().clone()
    }

    /// Points confirmed by the store during this session
    pub fn awarded_points(&self) -> u64 {
        self.awarded_points.get()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

use crate::traits::{RewardError, RewardStore, XpReceipt};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};

/// Reward store kept in memory (tests and offline play)
#[derive(Debug, Default)]
pub struct InMemoryRewardStore {
    total: Cell<u64>,
    awards: RefCell<Vec<u32>>,
    failures_left: Cell<usize>,
}

impl InMemoryRewardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing XP total
    pub fn with_total(total: u64) -> Self {
        let store = Self::default();
        store.total.set(total);
        store
    }

    /// Make the next `count` updates fail as if the backend were down
    pub fn fail_next(&self, count: usize) {
        self.failures_left.set(count);
    }

    pub fn total_xp(&self) -> u64 {
        self.total.get()
    }

    /// Points of every successful update, in order
    pub fn awards(&self) -> Vec<u32> {
        self.awards.borrow().clone()
    }
}

#[async_trait(?Send)]
impl RewardStore for InMemoryRewardStore {
    async fn update_xp(&self, points: u32) -> Result<XpReceipt, RewardError> {
        let failures = self.failures_left.get();
        if failures > 0 {
            self.failures_left.set(failures - 1);
            return Err(RewardError::Unavailable);
        }

        let total = self.total.get() + u64::from(points);
        self.total.set(total);
        self.awards.borrow_mut().push(points);
        tracing::debug!("In-memory XP total is now {}", total);

        Ok(XpReceipt {
            points,
            total_xp: Some(total),
        })
    }
}

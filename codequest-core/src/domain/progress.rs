use crate::domain::{Activity, ActivityCatalog, ActivityId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Request to credit XP for a first-time completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct XpAwardRequest {
    pub activity_id: ActivityId,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, JsonSchema)]
pub enum ProgressError {
    #[error("Activity not found: {0}")]
    ActivityNotFound(ActivityId),

    #[error("Activity {0} is already completed")]
    AlreadyCompleted(ActivityId),
}

/// Completed activities of the current session (not persisted)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompletionRecord {
    /// Points credited per completed id
    completed: BTreeMap<ActivityId, u32>,
}

impl CompletionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an activity completed. Fails without side effects when it
    /// already is.
    pub fn complete(&mut self, activity: &Activity) -> Result<XpAwardRequest, ProgressError> {
        if self.completed.contains_key(&activity.id) {
            return Err(ProgressError::AlreadyCompleted(activity.id));
        }
        self.completed.insert(activity.id, activity.points);

        tracing::debug!(
            "Recorded completion of activity {} ({} points, {} total)",
            activity.id,
            activity.points,
            self.total_points()
        );

        Ok(XpAwardRequest {
            activity_id: activity.id,
            points: activity.points,
        })
    }

    /// Look the id up in `catalog` and complete it
    pub fn complete_id(
        &mut self,
        catalog: &ActivityCatalog,
        id: ActivityId,
    ) -> Result<XpAwardRequest, ProgressError> {
        let activity = catalog.get(id).ok_or(ProgressError::ActivityNotFound(id))?;
        self.complete(activity)
    }

    pub fn is_completed(&self, id: ActivityId) -> bool {
        self.completed.contains_key(&id)
    }

    pub fn total_points(&self) -> u64 {
        self.completed.values().map(|p| u64::from(*p)).sum()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Completed ids in ascending order
    pub fn completed_ids(&self) -> Vec<ActivityId> {
        self.completed.keys().copied().collect()
    }

    /// Share of `total` activities completed, rounded down
    pub fn percent(&self, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        ((self.completed_count().min(total) * 100) / total) as u8
    }
}

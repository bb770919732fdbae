use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Acknowledgement from the reward store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct XpReceipt {
    /// Points that were applied
    pub points: u32,

    /// New persisted total, when the backend reports one
    #[serde(default)]
    pub total_xp: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RewardError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend rejected award (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Reward store unavailable")]
    Unavailable,
}

/// External service holding the persisted user XP total.
///
/// Futures are not required to be `Send`: the browser implementation awaits
/// JS promises on the single UI thread.
#[async_trait(?Send)]
pub trait RewardStore {
    /// Apply `points` to the user's XP total
    async fn update_xp(&self, points: u32) -> Result<XpReceipt, RewardError>;
}

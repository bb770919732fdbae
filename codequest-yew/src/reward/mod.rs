mod gloo_store;

pub use gloo_store::GlooRewardStore;

use async_trait::async_trait;
use codequest_core::{ApiConfig, InMemoryRewardStore, RewardError, RewardStore, XpReceipt};

/// Reward backend chosen at startup: the real XP endpoint, or an
/// in-memory tally when no backend is configured
pub enum BrowserRewardStore {
    Http(GlooRewardStore),
    Offline(InMemoryRewardStore),
}

impl BrowserRewardStore {
    pub fn from_config(api: Option<ApiConfig>) -> Self {
        match api {
            Some(config) => {
                tracing::info!("🌐 Sending awards to {}", config.xp_url());
                BrowserRewardStore::Http(GlooRewardStore::new(config))
            }
            None => {
                tracing::info!("📴 No backend configured, awards stay in memory");
                BrowserRewardStore::Offline(InMemoryRewardStore::new())
            }
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, BrowserRewardStore::Offline(_))
    }
}

#[async_trait(?Send)]
impl RewardStore for BrowserRewardStore {
    async fn update_xp(&self, points: u32) -> Result<XpReceipt, RewardError> {
        match self {
            BrowserRewardStore::Http(store) => store.update_xp(points).await,
            BrowserRewardStore::Offline(store) => store.update_xp(points).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selection() {
        assert!(BrowserRewardStore::from_config(None).is_offline());
        assert!(
            !BrowserRewardStore::from_config(Some(ApiConfig::new("https://api.example.test")))
                .is_offline()
        );
    }
}

use async_trait::async_trait;
use codequest_core::{ApiConfig, RewardError, RewardStore, XpReceipt};
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct XpUpdate {
    points: u32,
}

#[derive(Debug, Deserialize)]
struct XpUpdateResponse {
    #[serde(default)]
    xp: Option<u64>,
}

/// Reward store calling the XP endpoint with `fetch`
pub struct GlooRewardStore {
    config: ApiConfig,
}

impl GlooRewardStore {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

fn receipt_from_body(points: u32, body: &str) -> Result<XpReceipt, RewardError> {
    let total_xp = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str::<XpUpdateResponse>(body)
            .map_err(|e| RewardError::InvalidResponse(e.to_string()))?
            .xp
    };
    Ok(XpReceipt { points, total_xp })
}

#[async_trait(?Send)]
impl RewardStore for GlooRewardStore {
    async fn update_xp(&self, points: u32) -> Result<XpReceipt, RewardError> {
        let mut request = Request::post(&self.config.xp_url());
        if let Some(token) = &self.config.token {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request
            .json(&XpUpdate { points })
            .map_err(|e| RewardError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| RewardError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RewardError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(RewardError::Rejected {
                status,
                message: body,
            });
        }

        receipt_from_body(points, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_from_body() {
        assert_eq!(
            receipt_from_body(15, r#"{"xp": 40}"#).unwrap().total_xp,
            Some(40)
        );
        assert_eq!(receipt_from_body(15, "").unwrap().total_xp, None);
        assert!(receipt_from_body(15, "nope").is_err());
    }
}

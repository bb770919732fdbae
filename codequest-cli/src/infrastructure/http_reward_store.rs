use crate::infrastructure::{CliError, Result};
use async_trait::async_trait;
use codequest_core::{ApiConfig, RewardError, RewardStore, XpReceipt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct XpUpdate {
    points: u32,
}

#[derive(Debug, Default, Deserialize)]
struct XpUpdateResponse {
    #[serde(default)]
    xp: Option<u64>,
}

/// Reward store backed by the XP endpoint of the learning backend
pub struct HttpRewardStore {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpRewardStore {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CliError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

/// The backend may answer with an empty body or without a total
fn parse_receipt(points: u32, body: &str) -> std::result::Result<XpReceipt, RewardError> {
    if body.trim().is_empty() {
        return Ok(XpReceipt {
            points,
            total_xp: None,
        });
    }

    let response: XpUpdateResponse =
        serde_json::from_str(body).map_err(|e| RewardError::InvalidResponse(e.to_string()))?;

    Ok(XpReceipt {
        points,
        total_xp: response.xp,
    })
}

#[async_trait(?Send)]
impl RewardStore for HttpRewardStore {
    async fn update_xp(&self, points: u32) -> std::result::Result<XpReceipt, RewardError> {
        let url = self.config.xp_url();
        tracing::debug!("📤 POST {} ({} points)", url, points);

        let mut request = self.client.post(&url).json(&XpUpdate { points });
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RewardError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RewardError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(RewardError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_receipt(points, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_body_shape() {
        let body = serde_json::to_value(XpUpdate { points: 15 }).unwrap();
        assert_eq!(body, serde_json::json!({ "points": 15 }));
    }

    #[test]
    fn test_parse_receipt_with_total() {
        let receipt = parse_receipt(10, r#"{"xp": 130, "level": 2}"#).unwrap();
        assert_eq!(receipt.points, 10);
        assert_eq!(receipt.total_xp, Some(130));
    }

    #[test]
    fn test_parse_receipt_without_total() {
        assert_eq!(parse_receipt(10, "").unwrap().total_xp, None);
        assert_eq!(parse_receipt(10, "{}").unwrap().total_xp, None);
    }

    #[test]
    fn test_parse_receipt_garbage() {
        assert!(matches!(
            parse_receipt(10, "<html>"),
            Err(RewardError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_store_keeps_config() {
        let store =
            HttpRewardStore::new(ApiConfig::new("http://example.test/").with_token("abc")).unwrap();
        assert_eq!(store.config().xp_url(), "http://example.test/api/users/xp");
        assert_eq!(store.config().token.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let store =
            HttpRewardStore::new(ApiConfig::new("http://127.0.0.1:9").with_timeout(500)).unwrap();
        let result = store.update_xp(5).await;
        assert!(matches!(result, Err(RewardError::Network(_))));
    }
}

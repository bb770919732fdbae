use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays shared by every game template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTimings {
    /// How long inline feedback stays visible
    pub feedback_clear_ms: u64,

    /// Pairs memory: delay before a mismatched pair turns face down
    pub flip_back_ms: u64,

    /// Sequence recall: pause between a solved level and the next playback
    pub level_pause_ms: u64,

    /// Timed match: countdown resolution
    pub countdown_tick_ms: u64,
}

impl Default for GameTimings {
    fn default() -> Self {
        Self {
            feedback_clear_ms: 1500,
            flip_back_ms: 1000,
            level_pause_ms: 1000,
            countdown_tick_ms: 1000,
        }
    }
}

impl GameTimings {
    pub fn with_feedback_clear(mut self, ms: u64) -> Self {
        self.feedback_clear_ms = ms;
        self
    }

    pub fn with_flip_back(mut self, ms: u64) -> Self {
        self.flip_back_ms = ms;
        self
    }

    pub fn with_level_pause(mut self, ms: u64) -> Self {
        self.level_pause_ms = ms;
        self
    }
}

/// Where XP awards are sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL (no trailing slash)
    pub base_url: String,

    /// Path of the XP update endpoint
    pub xp_path: String,

    /// Bearer token forwarded as-is (the core does not handle login)
    pub token: Option<String>,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            xp_path: "/api/users/xp".to_string(),
            token: None,
            timeout_ms: 10_000,
        }
    }
}

impl ApiConfig {
    pub const URL_VAR: &'static str = "CODEQUEST_API_URL";
    pub const TOKEN_VAR: &'static str = "CODEQUEST_API_TOKEN";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Read `CODEQUEST_API_URL` / `CODEQUEST_API_TOKEN`, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = match std::env::var(Self::URL_VAR) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        };
        if let Ok(token) = std::env::var(Self::TOKEN_VAR) {
            if !token.trim().is_empty() {
                config.token = Some(token);
            }
        }
        config
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Full URL of the XP endpoint
    pub fn xp_url(&self) -> String {
        format!("{}{}", self.base_url, self.xp_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let timings = GameTimings::default();
        assert_eq!(timings.feedback_clear_ms, 1500);
        assert_eq!(timings.flip_back_ms, 1000);
        assert_eq!(timings.countdown_tick_ms, 1000);
    }

    #[test]
    fn test_timings_builder() {
        let timings = GameTimings::default()
            .with_flip_back(300)
            .with_level_pause(200)
            .with_feedback_clear(50);
        assert_eq!(timings.flip_back_ms, 300);
        assert_eq!(timings.level_pause_ms, 200);
        assert_eq!(timings.feedback_clear_ms, 50);
    }

    #[test]
    fn test_xp_url_strips_trailing_slash() {
        let config = ApiConfig::new("https://api.example.org/");
        assert_eq!(config.xp_url(), "https://api.example.org/api/users/xp");
    }

    #[test]
    fn test_token_and_timeout() {
        let config = ApiConfig::default().with_token("abc").with_timeout(250);
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout(), Duration::from_millis(250));
    }
}

use codequest_core::{ActivityId, QueueError, RewardError};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema generation failed: {0}")]
    SchemaGeneration(String),

    #[error("Invalid schema directory: {path}")]
    InvalidSchemaDirectory { path: PathBuf },

    #[error("Activity {0} not found")]
    ActivityNotFound(ActivityId),

    #[error("Could not understand '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("Command queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Reward store error: {0}")]
    Reward(#[from] RewardError),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CliError {
    pub fn invalid_directory(path: PathBuf) -> Self {
        CliError::InvalidSchemaDirectory { path }
    }

    pub fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CliError::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CliError::ActivityNotFound(42).to_string(),
            "Activity 42 not found"
        );
        assert_eq!(
            CliError::invalid_input("flip x", "expected a card number").to_string(),
            "Could not understand 'flip x': expected a card number"
        );
    }

    #[test]
    fn test_reward_error_conversion() {
        let err: CliError = RewardError::Unavailable.into();
        assert!(matches!(err, CliError::Reward(RewardError::Unavailable)));
    }
}

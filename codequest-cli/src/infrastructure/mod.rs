pub mod error;
pub mod http_reward_store;
pub mod observability;

pub use error::{CliError, Result};
pub use http_reward_store::HttpRewardStore;
pub use observability::LogConfig;

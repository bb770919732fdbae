pub mod infrastructure;
pub mod presentation;

pub use infrastructure::{CliError, HttpRewardStore, LogConfig, Result};

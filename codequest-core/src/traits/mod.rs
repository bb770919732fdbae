mod game;
mod reward_store;

pub use game::GameMachine;
pub use reward_store::{RewardError, RewardStore, XpReceipt};

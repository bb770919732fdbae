mod memory_reward_store;

pub use memory_reward_store::InMemoryRewardStore;

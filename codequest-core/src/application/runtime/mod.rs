mod activity_loop;
mod command_queue;
mod reward_dispatcher;

pub use activity_loop::ActivityLoop;
pub use command_queue::{CommandQueue, QueueError};
pub use reward_dispatcher::{AwardOutcome, RewardDispatcher};

mod commands;
mod event_loop;
mod events;
pub mod runtime;

pub use commands::ActivityCommand;
pub use event_loop::ActivityEventLoop;
pub use events::ActivityEvent;
pub use runtime::{ActivityLoop, AwardOutcome, CommandQueue, QueueError, RewardDispatcher};

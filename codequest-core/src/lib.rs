pub mod application;
pub mod clock;
pub mod config;
pub mod domain;
pub mod games;
pub mod infrastructure;
pub mod snippet;
pub mod traits;

pub use application::{
    ActivityCommand, ActivityEvent, ActivityEventLoop, ActivityLoop, AwardOutcome, QueueError,
    RewardDispatcher,
};
pub use clock::Stopwatch;
pub use config::{ApiConfig, GameTimings};
pub use domain::{
    Activity, ActivityCatalog, ActivityId, ActivityView, CatalogError, CompletionRecord,
    Difficulty, ProgressError, XpAwardRequest,
};
pub use games::{
    Feedback, FeedbackKind, GameEvent, GameInput, GameKind, GamePhase, GameSession, GameSpec,
    GameSpecError, GameView, SessionView,
};
pub use infrastructure::InMemoryRewardStore;
pub use traits::{GameMachine, RewardError, RewardStore, XpReceipt};

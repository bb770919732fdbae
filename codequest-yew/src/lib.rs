//! # CodeQuest Yew Components
//!
//! Browser shell for the CodeQuest activities: catalog grid, activity
//! dialog with one widget per game template, and the XP reward store.

pub mod app;
pub mod components;
pub mod hooks;
pub mod pages;
pub mod providers;
pub mod reward;

// Re-exports for convenience
pub use app::App;
pub use components::{ActivityCard, ActivityDialog, ActivityGrid, ProgressSummary};
pub use hooks::{use_activities, use_game_input, ActivitiesContext};
pub use pages::ActivitiesPage;
pub use providers::{ActivitiesProvider, ActivitiesProviderProps};
pub use reward::{BrowserRewardStore, GlooRewardStore};

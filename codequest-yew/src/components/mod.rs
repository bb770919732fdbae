//! UI components for CodeQuest activities

mod activity_card;
mod activity_dialog;
mod activity_grid;
mod celebration;
mod feedback_banner;
pub mod games;
mod progress_summary;

pub use activity_card::ActivityCard;
pub use activity_dialog::ActivityDialog;
pub use activity_grid::ActivityGrid;
pub use celebration::CelebrationBanner;
pub use feedback_banner::FeedbackBanner;
pub use progress_summary::ProgressSummary;

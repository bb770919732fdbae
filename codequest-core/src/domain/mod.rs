mod activity;
mod builtin;
mod catalog;
mod progress;

pub use activity::{Activity, ActivityId, ActivityView, Difficulty};
pub use catalog::{ActivityCatalog, CatalogError};
pub use progress::{CompletionRecord, ProgressError, XpAwardRequest};

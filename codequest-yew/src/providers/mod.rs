mod activities_provider;

pub use activities_provider::{ActivitiesProvider, ActivitiesProviderProps};

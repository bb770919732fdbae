mod activities_page;

pub use activities_page::ActivitiesPage;

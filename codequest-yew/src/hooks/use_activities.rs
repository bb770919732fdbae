use codequest_core::{
    Activity, ActivityCommand, ActivityEventLoop, ActivityView, GameInput, SessionView,
};
use std::rc::Rc;
use yew::prelude::*;

/// Transient "activity complete" banner
#[derive(Debug, Clone, PartialEq)]
pub struct Celebration {
    pub title: String,
    pub points: u32,
}

/// What the page renders, copied out of the activities loop after each batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitiesSnapshot {
    pub activities: Vec<ActivityView>,
    pub open: Option<Activity>,
    pub session: Option<SessionView>,
    pub total_points: u64,
    pub completed_count: usize,
}

impl ActivitiesSnapshot {
    pub fn capture(event_loop: &ActivityEventLoop) -> Self {
        let record = event_loop.record();
        Self {
            activities: event_loop.views(),
            open: event_loop.open_activity().cloned(),
            session: event_loop.session_view(),
            total_points: record.total_points(),
            completed_count: record.completed_count(),
        }
    }

    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for view in &self.activities {
            if !categories.contains(&view.category) {
                categories.push(view.category.clone());
            }
        }
        categories
    }

    pub fn percent_complete(&self) -> u8 {
        if self.activities.is_empty() {
            return 0;
        }
        ((self.completed_count * 100) / self.activities.len()) as u8
    }
}

/// Activities state accessible via hook
#[derive(Clone)]
pub struct ActivitiesContext {
    pub snapshot: ActivitiesSnapshot,
    pub celebration: Option<Celebration>,

    /// Awards the reward store has not accepted yet
    pub unsaved_awards: usize,
    pub offline: bool,

    /// Send commands to the activities loop
    pub send_command: Rc<dyn Fn(ActivityCommand)>,

    /// Resubmit failed awards
    pub retry_awards: Rc<dyn Fn()>,
}

impl PartialEq for ActivitiesContext {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot == other.snapshot
            && self.celebration == other.celebration
            && self.unsaved_awards == other.unsaved_awards
            && self.offline == other.offline
    }
}

/// Hook to access the activities state
///
/// # Example
///
/// ```rust,no_run
/// use codequest_yew::use_activities;
/// use codequest_core::ActivityCommand;
///
/// # #[yew::function_component]
/// # fn Example() -> yew::Html {
/// let activities = use_activities();
/// (activities.send_command)(ActivityCommand::OpenActivity { activity_id: 5 });
/// # yew::html! {}
/// # }
/// ```
#[hook]
pub fn use_activities() -> ActivitiesContext {
    use_context::<ActivitiesContext>()
        .expect("use_activities must be used within an ActivitiesProvider")
}

/// Callback feeding player input into the open game
#[hook]
pub fn use_game_input() -> Callback<GameInput> {
    let activities = use_activities();
    let send_command = activities.send_command.clone();
    Callback::from(move |input: GameInput| send_command(ActivityCommand::Input { input }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_fresh_loop() {
        let snapshot = ActivitiesSnapshot::capture(&ActivityEventLoop::default());
        assert_eq!(snapshot.activities.len(), 14);
        assert!(snapshot.open.is_none());
        assert_eq!(snapshot.total_points, 0);
        assert_eq!(snapshot.percent_complete(), 0);
    }

    #[test]
    fn test_snapshot_tracks_open_activity() {
        let mut event_loop = ActivityEventLoop::default();
        event_loop.handle_command(ActivityCommand::OpenActivity { activity_id: 5 });
        event_loop.handle_command(ActivityCommand::CompleteActivity { activity_id: 1 });

        let snapshot = ActivitiesSnapshot::capture(&event_loop);
        assert_eq!(snapshot.open.as_ref().map(|a| a.id), Some(5));
        assert!(snapshot.session.is_some());
        assert_eq!(snapshot.total_points, 10);
        assert_eq!(snapshot.completed_count, 1);
        assert_eq!(snapshot.percent_complete(), 7);
    }

    #[test]
    fn test_categories_keep_catalog_order() {
        let snapshot = ActivitiesSnapshot::capture(&ActivityEventLoop::default());
        let categories = snapshot.categories();
        assert_eq!(categories[0], snapshot.activities[0].category);
        for (i, category) in categories.iter().enumerate() {
            assert!(!categories[i + 1..].contains(category));
        }
    }
}

use codequest_core::ActivityCommand;
use codequest_tests::ActivitiesWorld;
use cucumber::{then, when};

// ===== When Steps =====

#[when(expr = "the player completes activity {int}")]
async fn complete_activity(world: &mut ActivitiesWorld, activity_id: u32) {
    world.execute(ActivityCommand::CompleteActivity { activity_id });
}

// ===== Then Steps =====

#[then(expr = "the total points are {int}")]
async fn total_points_are(world: &mut ActivitiesWorld, points: u64) {
    assert_eq!(world.event_loop.record().total_points(), points);
}

#[then(expr = "the completed count is {int}")]
async fn completed_count_is(world: &mut ActivitiesWorld, count: usize) {
    assert_eq!(world.event_loop.record().completed_count(), count);
}

#[then(expr = "activity {int} is marked completed")]
async fn activity_marked_completed(world: &mut ActivitiesWorld, activity_id: u32) {
    let view = world
        .event_loop
        .views()
        .into_iter()
        .find(|v| v.id == activity_id)
        .unwrap_or_else(|| panic!("Activity {} not in catalog", activity_id));
    assert!(view.completed);
}

#[then(expr = "{int} award(s) of {int} points was/were requested")]
async fn awards_requested(world: &mut ActivitiesWorld, count: usize, points: u32) {
    let awards = world.awards();
    assert_eq!(awards.len(), count, "awards: {:?}", awards);
    assert!(awards.iter().all(|p| *p == points), "awards: {:?}", awards);
}

#[then("the last command produced no events")]
async fn no_events(world: &mut ActivitiesWorld) {
    assert!(world.last_events.is_empty(), "{:?}", world.last_events);
}

use codequest_core::{ActivityCommand, ActivityEvent};
use codequest_tests::ActivitiesWorld;
use cucumber::{given, then, when};

// ===== Given Steps =====

#[given("a fresh activities page")]
async fn fresh_page(_world: &mut ActivitiesWorld) {
    // No-op: the world starts with the bundled catalog and no progress
}

#[given(expr = "activity {int} is open")]
async fn activity_is_open(world: &mut ActivitiesWorld, activity_id: u32) {
    let events = world.execute(ActivityCommand::OpenActivity { activity_id });
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ActivityEvent::ActivityOpened { .. })),
        "Activity {} did not open: {:?}",
        activity_id,
        events
    );
}

// ===== When Steps =====

#[when(expr = "{int} milliseconds pass")]
async fn milliseconds_pass(world: &mut ActivitiesWorld, ms: u64) {
    world.tick_for(ms);
}

#[when("the player resets the game")]
async fn reset_game(world: &mut ActivitiesWorld) {
    world.execute(ActivityCommand::ResetGame);
}

#[when("the player closes the activity")]
async fn close_activity(world: &mut ActivitiesWorld) {
    world.execute(ActivityCommand::CloseActivity);
}

// ===== Then Steps =====

#[then(expr = "the game phase is {string}")]
async fn game_phase_is(world: &mut ActivitiesWorld, phase: String) {
    assert_eq!(world.session().phase().to_string(), phase);
}

#[then("no timers are pending")]
async fn no_timers_pending(world: &mut ActivitiesWorld) {
    assert_eq!(world.session().pending_timers(), 0);
}

#[then("no activity is open")]
async fn no_activity_open(world: &mut ActivitiesWorld) {
    assert!(world.event_loop.session().is_none());
}

#[then(expr = "the closed game had {int} pending timer(s)")]
async fn closed_game_had_timers(world: &mut ActivitiesWorld, expected: usize) {
    let cancelled = world.last_events.iter().find_map(|e| match e {
        ActivityEvent::ActivityClosed {
            cancelled_timers, ..
        } => Some(*cancelled_timers),
        _ => None,
    });
    assert_eq!(cancelled, Some(expected));
}

#[then("the game reported completion exactly once")]
async fn completed_once(world: &mut ActivitiesWorld) {
    assert_eq!(world.completions(), 1);
}

#[then("the game has not reported completion")]
async fn not_completed(world: &mut ActivitiesWorld) {
    assert_eq!(world.completions(), 0);
}

#[then(expr = "the last command failed with {string}")]
async fn last_command_failed(world: &mut ActivitiesWorld, message: String) {
    let reason = world
        .last_error_message()
        .unwrap_or_else(|| panic!("Expected a failure, got {:?}", world.last_events));
    assert!(
        reason.contains(&message),
        "Expected '{}' in '{}'",
        message,
        reason
    );
}

use codequest_tests::ActivitiesWorld;
use cucumber::{given, then, when};

// ===== Given Steps =====

#[given(expr = "the reward store fails the next {int} award(s)")]
async fn store_fails(world: &mut ActivitiesWorld, count: usize) {
    world.dispatcher.store().fail_next(count);
}

// ===== When Steps =====

#[when("the awards are dispatched")]
async fn dispatch_awards(world: &mut ActivitiesWorld) {
    let events = world.undispatched();
    world.dispatcher.dispatch_events(&events).await;
}

#[when("the player retries failed awards")]
async fn retry_awards(world: &mut ActivitiesWorld) {
    world.dispatcher.retry_failed().await;
}

// ===== Then Steps =====

#[then(expr = "the reward store total is {int}")]
async fn store_total(world: &mut ActivitiesWorld, total: u64) {
    assert_eq!(world.dispatcher.store().total_xp(), total);
}

#[then(expr = "{int} award(s) is/are waiting for retry")]
async fn awards_waiting(world: &mut ActivitiesWorld, count: usize) {
    assert_eq!(world.dispatcher.failed().len(), count);
}

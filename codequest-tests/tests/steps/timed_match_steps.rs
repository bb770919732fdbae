use codequest_core::games::{GameEngine, TimedMatch, TimedMatchInput, TimedMatchPhase};
use codequest_core::{ActivityCommand, GamePhase};
use codequest_tests::ActivitiesWorld;
use cucumber::{then, when};

fn timed(world: &ActivitiesWorld) -> &TimedMatch {
    match world.engine() {
        GameEngine::TimedMatch(game) => game,
        other => panic!("Expected a timed match game, got {}", other.kind()),
    }
}

fn pick(world: &mut ActivitiesWorld, index: usize) {
    world.execute(ActivityCommand::Input {
        input: TimedMatchInput::Pick(index).into(),
    });
}

// ===== When Steps =====

#[when("the player starts the timer")]
async fn start_timer(world: &mut ActivitiesWorld) {
    world.execute(ActivityCommand::Input {
        input: TimedMatchInput::Start.into(),
    });
}

#[when(expr = "the player picks the target {int} time(s)")]
async fn pick_target(world: &mut ActivitiesWorld, times: usize) {
    for _ in 0..times {
        let target = timed(world).target_index();
        pick(world, target);
    }
}

#[when("the player picks a wrong option")]
async fn pick_wrong(world: &mut ActivitiesWorld) {
    let target = timed(world).target_index();
    pick(world, (target + 1) % 2);
}

#[when("the timer runs out")]
async fn timer_runs_out(world: &mut ActivitiesWorld) {
    world.tick_until(|session| {
        session.phase() == GamePhase::TimedMatch(TimedMatchPhase::Expired)
    });
}

// ===== Then Steps =====

#[then(expr = "the match score is {int}")]
async fn match_score(world: &mut ActivitiesWorld, score: u32) {
    assert_eq!(timed(world).score(), score);
}

#[then(expr = "the countdown shows {int} seconds")]
async fn countdown_shows(world: &mut ActivitiesWorld, secs: u32) {
    assert_eq!(timed(world).time_left_secs(), secs);
}

use codequest_core::games::{
    GameEngine, SequenceRecall, SequenceRecallInput, SequenceRecallPhase,
};
use codequest_core::{ActivityCommand, GamePhase, GameView};
use codequest_tests::ActivitiesWorld;
use cucumber::{then, when};

fn recall(world: &ActivitiesWorld) -> &SequenceRecall {
    match world.engine() {
        GameEngine::SequenceRecall(game) => game,
        other => panic!("Expected a sequence recall game, got {}", other.kind()),
    }
}

fn parse_pads(list: &str) -> Vec<usize> {
    list.split(',')
        .map(|pad| pad.trim().parse().expect("pad numbers"))
        .collect()
}

// ===== When Steps =====

#[when("the player starts the playback")]
async fn start_playback(world: &mut ActivitiesWorld) {
    world.execute(ActivityCommand::Input {
        input: SequenceRecallInput::Start.into(),
    });
}

#[when("the playback finishes")]
async fn playback_finishes(world: &mut ActivitiesWorld) {
    world.tick_until(|session| {
        session.phase() == GamePhase::SequenceRecall(SequenceRecallPhase::Input)
    });
}

#[when(expr = "the player presses pads {string}")]
async fn press_pads(world: &mut ActivitiesWorld, pads: String) {
    for pad in parse_pads(&pads) {
        world.execute(ActivityCommand::Input {
            input: SequenceRecallInput::Press(pad).into(),
        });
    }
}

// ===== Then Steps =====

#[then(expr = "the expected sequence is {string}")]
async fn expected_sequence(world: &mut ActivitiesWorld, pads: String) {
    assert_eq!(recall(world).sequence(), parse_pads(&pads).as_slice());
}

#[then(expr = "the level score is {int}")]
async fn level_score(world: &mut ActivitiesWorld, score: u32) {
    assert_eq!(recall(world).score(), score);
}

#[then(expr = "{int} correct press(es) was/were counted")]
async fn presses_counted(world: &mut ActivitiesWorld, entered: usize) {
    let view = match world.session().view().game {
        GameView::SequenceRecall(view) => view,
        other => panic!("Expected a sequence recall view, got {:?}", other.kind()),
    };
    assert_eq!(view.entered, entered);
}

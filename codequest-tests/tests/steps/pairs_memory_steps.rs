use codequest_core::games::{GameEngine, PairsMemory, PairsMemoryInput};
use codequest_core::ActivityCommand;
use codequest_tests::ActivitiesWorld;
use cucumber::{then, when};

fn board(world: &ActivitiesWorld) -> &PairsMemory {
    match world.engine() {
        GameEngine::PairsMemory(game) => game,
        other => panic!("Expected a pairs memory game, got {}", other.kind()),
    }
}

fn flip(world: &mut ActivitiesWorld, index: usize) {
    world.execute(ActivityCommand::Input {
        input: PairsMemoryInput::Flip(index).into(),
    });
}

/// Positions of both cards of every symbol, in deal order
fn pair_positions(game: &PairsMemory) -> Vec<(usize, usize)> {
    let cards = game.cards();
    let mut pairs = Vec::new();
    for (i, card) in cards.iter().enumerate() {
        if let Some(j) = (i + 1..cards.len()).find(|&j| cards[j].symbol == card.symbol) {
            pairs.push((i, j));
        }
    }
    pairs
}

// ===== When Steps =====

#[when("the player matches every pair")]
async fn match_every_pair(world: &mut ActivitiesWorld) {
    let pairs = pair_positions(board(world));
    for (a, b) in pairs {
        flip(world, a);
        flip(world, b);
    }
}

#[when("the player flips two cards that do not match")]
async fn flip_mismatch(world: &mut ActivitiesWorld) {
    let cards = board(world).cards();
    let other = cards
        .iter()
        .position(|card| card.symbol != cards[0].symbol)
        .expect("Deck has a single symbol");
    flip(world, 0);
    flip(world, other);
}

#[when("the player flips another card")]
async fn flip_another(world: &mut ActivitiesWorld) {
    let index = board(world)
        .cards()
        .iter()
        .position(|card| !card.face_up && !card.matched)
        .expect("No face-down card left");
    flip(world, index);
}

// ===== Then Steps =====

#[then(expr = "the board has {int} cards")]
async fn board_has_cards(world: &mut ActivitiesWorld, count: usize) {
    assert_eq!(board(world).cards().len(), count);
}

#[then(expr = "the move counter is {int}")]
async fn move_counter_is(world: &mut ActivitiesWorld, moves: u32) {
    assert_eq!(board(world).moves(), moves);
}

#[then(expr = "{int} pairs are matched")]
async fn pairs_matched(world: &mut ActivitiesWorld, count: usize) {
    let game = board(world);
    assert_eq!(game.matched_pairs(), count);
    assert_eq!(
        game.cards().iter().filter(|card| card.matched).count(),
        count * 2
    );
}

#[then(expr = "{int} cards are face up")]
async fn cards_face_up(world: &mut ActivitiesWorld, count: usize) {
    let face_up = board(world)
        .cards()
        .iter()
        .filter(|card| card.face_up && !card.matched)
        .count();
    assert_eq!(face_up, count);
}

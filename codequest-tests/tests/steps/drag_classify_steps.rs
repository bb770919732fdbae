use codequest_core::games::{DragClassify, DragClassifyInput, GameEngine};
use codequest_core::ActivityCommand;
use codequest_tests::ActivitiesWorld;
use cucumber::{then, when};

fn sorter(world: &ActivitiesWorld) -> &DragClassify {
    match world.engine() {
        GameEngine::DragClassify(game) => game,
        other => panic!("Expected a drag classify game, got {}", other.kind()),
    }
}

fn drop_item(world: &mut ActivitiesWorld, item: usize, bin: usize) {
    world.execute(ActivityCommand::Input {
        input: DragClassifyInput::Drop { item, bin }.into(),
    });
}

fn bin(world: &ActivitiesWorld, category: &str) -> usize {
    sorter(world)
        .bin_of(category)
        .unwrap_or_else(|| panic!("No '{}' bin", category))
}

// ===== When Steps =====

#[when(expr = "the player drops a {word} on the {word} bin")]
async fn drop_shape(world: &mut ActivitiesWorld, shape: String, target: String) {
    let shape_bin = bin(world, &shape);
    let target_bin = bin(world, &target);
    let item = sorter(world)
        .pending()
        .iter()
        .find(|item| item.category == shape_bin)
        .map(|item| item.id)
        .unwrap_or_else(|| panic!("No pending {}", shape));
    drop_item(world, item, target_bin);
}

#[when("the player sorts every shape into its own bin")]
async fn sort_everything(world: &mut ActivitiesWorld) {
    let moves: Vec<(usize, usize)> = sorter(world)
        .pending()
        .iter()
        .map(|item| (item.id, item.category))
        .collect();
    for (item, category) in moves {
        drop_item(world, item, category);
    }
}

// ===== Then Steps =====

#[then(expr = "{int} items are pending")]
async fn items_pending(world: &mut ActivitiesWorld, count: usize) {
    assert_eq!(sorter(world).pending().len(), count);
}

#[then(expr = "the {word} bin holds {int} item(s)")]
async fn bin_holds(world: &mut ActivitiesWorld, category: String, count: usize) {
    let bin = bin(world, &category);
    assert_eq!(sorter(world).bucket(bin).len(), count);
}

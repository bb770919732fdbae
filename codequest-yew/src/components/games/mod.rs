//! One widget per game template

mod drag_classify;
mod pairs_memory;
mod sequence_recall;
mod single_shot;
mod timed_match;

pub use drag_classify::DragClassifyBoard;
pub use pairs_memory::PairsMemoryBoard;
pub use sequence_recall::SequenceRecallBoard;
pub use single_shot::SingleShotBoard;
pub use timed_match::TimedMatchBoard;

use codequest_core::{GameInput, GameView};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GameWidgetProps {
    pub view: GameView,
    pub on_input: Callback<GameInput>,
}

/// Renders whichever template the open activity is bound to
#[function_component(GameWidget)]
pub fn game_widget(props: &GameWidgetProps) -> Html {
    let on_input = props.on_input.clone();
    match &props.view {
        GameView::TimedMatch(view) => {
            html! { <TimedMatchBoard view={view.clone()} {on_input} /> }
        }
        GameView::SequenceRecall(view) => {
            html! { <SequenceRecallBoard view={view.clone()} {on_input} /> }
        }
        GameView::PairsMemory(view) => {
            html! { <PairsMemoryBoard view={view.clone()} {on_input} /> }
        }
        GameView::DragClassify(view) => {
            html! { <DragClassifyBoard view={view.clone()} {on_input} /> }
        }
        GameView::SingleShot(view) => {
            html! { <SingleShotBoard view={view.clone()} {on_input} /> }
        }
    }
}

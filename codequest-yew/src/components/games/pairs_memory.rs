use codequest_core::games::{PairsMemoryInput, PairsMemoryView};
use codequest_core::GameInput;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PairsMemoryBoardProps {
    pub view: PairsMemoryView,
    pub on_input: Callback<GameInput>,
}

#[function_component(PairsMemoryBoard)]
pub fn pairs_memory_board(props: &PairsMemoryBoardProps) -> Html {
    let view = &props.view;

    html! {
        <div class="codequest-pairs">
            <div class="codequest-pairs__status">
                <span>{format!("Moves: {}", view.moves)}</span>
                <span>{format!("Pairs: {} / {}", view.matched_pairs, view.total_pairs)}</span>
            </div>
            <div class="codequest-pairs__cards">
                {for view.cards.iter().enumerate().map(|(i, card)| {
                    let onclick = {
                        let on_input = props.on_input.clone();
                        Callback::from(move |_: MouseEvent| {
                            on_input.emit(PairsMemoryInput::Flip(i).into())
                        })
                    };
                    html! {
                        <button
                            class={classes!(
                                "codequest-card-tile",
                                card.face_up.then_some("codequest-card-tile--up"),
                                card.matched.then_some("codequest-card-tile--matched")
                            )}
                            disabled={card.matched}
                            {onclick}
                        >
                            {card.symbol.clone().unwrap_or_else(|| "?".to_string())}
                        </button>
                    }
                })}
            </div>
        </div>
    }
}

use codequest_core::games::{SequenceRecallInput, SequenceRecallPhase, SequenceRecallView};
use codequest_core::GameInput;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SequenceRecallBoardProps {
    pub view: SequenceRecallView,
    pub on_input: Callback<GameInput>,
}

#[function_component(SequenceRecallBoard)]
pub fn sequence_recall_board(props: &SequenceRecallBoardProps) -> Html {
    let view = &props.view;
    let send = |input: SequenceRecallInput| {
        let on_input = props.on_input.clone();
        Callback::from(move |_: MouseEvent| on_input.emit(input.clone().into()))
    };

    let accepting = view.phase == SequenceRecallPhase::Input;
    let status = match view.phase {
        SequenceRecallPhase::Waiting => "Press start and watch the pattern".to_string(),
        SequenceRecallPhase::Showing => "Watch carefully...".to_string(),
        SequenceRecallPhase::Input => format!(
            "Your turn: {} / {}",
            view.entered, view.sequence_length
        ),
        SequenceRecallPhase::Success => "Well done!".to_string(),
        SequenceRecallPhase::Failure => "Wrong pad, try again".to_string(),
    };

    html! {
        <div class="codequest-sequence">
            <div class="codequest-sequence__status">
                <span>{format!("Level {} / {}", view.level, view.levels_to_complete)}</span>
                <span>{format!("Score: {}", view.score)}</span>
            </div>
            <p>{status}</p>
            <div class="codequest-sequence__pads">
                {for (0..view.pads).map(|pad| html! {
                    <button
                        class={classes!(
                            "codequest-pad",
                            (view.highlighted == Some(pad)).then_some("codequest-pad--lit")
                        )}
                        disabled={!accepting}
                        onclick={send(SequenceRecallInput::Press(pad))}
                    />
                })}
            </div>
            {if matches!(view.phase, SequenceRecallPhase::Waiting | SequenceRecallPhase::Failure) {
                html! {
                    <button class="codequest-btn codequest-btn--primary"
                        onclick={send(SequenceRecallInput::Start)}>
                        {"Start"}
                    </button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}

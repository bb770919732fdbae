use codequest_core::games::{TimedMatchInput, TimedMatchPhase, TimedMatchView};
use codequest_core::GameInput;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimedMatchBoardProps {
    pub view: TimedMatchView,
    pub on_input: Callback<GameInput>,
}

#[function_component(TimedMatchBoard)]
pub fn timed_match_board(props: &TimedMatchBoardProps) -> Html {
    let view = &props.view;
    let send = |input: TimedMatchInput| {
        let on_input = props.on_input.clone();
        Callback::from(move |_: MouseEvent| on_input.emit(input.clone().into()))
    };

    html! {
        <div class="codequest-timed-match">
            <div class="codequest-timed-match__status">
                <span>{format!("Score: {}", view.score)}</span>
                <span>{format!("Time: {}s", view.time_left_secs)}</span>
                {match view.target_score {
                    Some(target) => html! { <span>{format!("Goal: {}", target)}</span> },
                    None => html! {},
                }}
            </div>
            <p class="codequest-timed-match__prompt">{&view.prompt}</p>
            {match view.phase {
                TimedMatchPhase::Idle => html! {
                    <button class="codequest-btn codequest-btn--primary"
                        onclick={send(TimedMatchInput::Start)}>
                        {"Start"}
                    </button>
                },
                TimedMatchPhase::Running => html! {
                    <>
                        <div class="codequest-timed-match__target">{&view.target}</div>
                        <div class="codequest-timed-match__options">
                            {for view.options.iter().enumerate().map(|(i, option)| html! {
                                <button class="codequest-option" onclick={send(TimedMatchInput::Pick(i))}>
                                    {option}
                                </button>
                            })}
                        </div>
                    </>
                },
                TimedMatchPhase::Expired => html! {
                    <p class="codequest-timed-match__over">
                        {format!("Time's up! Final score: {}", view.score)}
                    </p>
                },
            }}
        </div>
    }
}

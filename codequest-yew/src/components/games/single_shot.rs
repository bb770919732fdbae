use codequest_core::games::{AnswerKind, SingleShotInput, SingleShotPhase, SingleShotView};
use codequest_core::GameInput;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SingleShotBoardProps {
    pub view: SingleShotView,
    pub on_input: Callback<GameInput>,
}

/// Quiz, math and coding questions
#[function_component(SingleShotBoard)]
pub fn single_shot_board(props: &SingleShotBoardProps) -> Html {
    let view = &props.view;
    let draft = use_state(String::new);

    // New question, fresh editor (programs start from their starter code)
    {
        let draft = draft.clone();
        let starter = match view.answer_kind {
            AnswerKind::Program => view.code.clone().unwrap_or_default(),
            _ => String::new(),
        };
        use_effect_with((view.position, view.prompt.clone()), move |_| {
            draft.set(starter);
            || ()
        });
    }

    let on_text = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };

    let on_code = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let on_input = props.on_input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_input.emit(SingleShotInput::Submit((*draft).clone()).into());
        })
    };

    let on_next = {
        let on_input = props.on_input.clone();
        Callback::from(move |_: MouseEvent| on_input.emit(SingleShotInput::Next.into()))
    };

    if view.phase == SingleShotPhase::Finished {
        return html! {
            <div class="codequest-question codequest-question--finished">
                <p>{format!("All {} questions solved! Score: {}", view.total, view.score)}</p>
            </div>
        };
    }

    let answering = view.phase == SingleShotPhase::Answering;

    let answer_area = match view.answer_kind {
        AnswerKind::Choice => html! {
            <div class="codequest-question__choices">
                {for view.choices.iter().enumerate().map(|(i, choice)| {
                    let on_input = props.on_input.clone();
                    let onclick = Callback::from(move |_: MouseEvent| {
                        on_input.emit(SingleShotInput::Choose(i).into())
                    });
                    html! {
                        <button class="codequest-option" disabled={!answering} {onclick}>
                            {choice}
                        </button>
                    }
                })}
            </div>
        },
        AnswerKind::Program => html! {
            <form class="codequest-question__form" onsubmit={on_submit}>
                <textarea
                    class="codequest-editor"
                    rows="10"
                    spellcheck="false"
                    value={(*draft).clone()}
                    oninput={on_code}
                    disabled={!answering}
                />
                <button class="codequest-btn codequest-btn--primary" type="submit"
                    disabled={!answering}>
                    {"Run"}
                </button>
            </form>
        },
        AnswerKind::Text | AnswerKind::Number => html! {
            <form class="codequest-question__form" onsubmit={on_submit}>
                <input
                    class="codequest-input"
                    type={if view.answer_kind == AnswerKind::Number { "number" } else { "text" }}
                    value={(*draft).clone()}
                    oninput={on_text}
                    disabled={!answering}
                />
                <button class="codequest-btn codequest-btn--primary" type="submit"
                    disabled={!answering}>
                    {"Submit"}
                </button>
            </form>
        },
    };

    html! {
        <div class="codequest-question">
            <div class="codequest-question__status">
                <span>{format!("Question {} / {}", view.position + 1, view.total)}</span>
                <span>{format!("Solved: {}", view.solved)}</span>
            </div>
            <p class="codequest-question__prompt">{&view.prompt}</p>
            {match (&view.code, view.answer_kind) {
                (Some(code), kind) if kind != AnswerKind::Program => html! {
                    <pre class="codequest-code">{code}</pre>
                },
                _ => html! {},
            }}
            {answer_area}
            {match &view.last_output {
                Some(lines) => html! {
                    <pre class="codequest-output">{lines.join("\n")}</pre>
                },
                None => html! {},
            }}
            {match &view.revealed_answer {
                Some(answer) => html! {
                    <div class="codequest-question__reveal">
                        <p>{format!("Answer: {}", answer)}</p>
                        {match &view.explanation {
                            Some(explanation) => html! { <p>{explanation}</p> },
                            None => html! {},
                        }}
                        <button class="codequest-btn" onclick={on_next}>{"Next"}</button>
                    </div>
                },
                None => html! {},
            }}
        </div>
    }
}

use super::games::GameWidget;
use super::FeedbackBanner;
use crate::hooks::use_game_input;
use codequest_core::{Activity, ActivityId, SessionView};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ActivityDialogProps {
    pub activity: Activity,
    pub session: SessionView,
    pub completed: bool,
    pub on_close: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_complete: Callback<ActivityId>,
}

/// Modal hosting the open activity's game
#[function_component(ActivityDialog)]
pub fn activity_dialog(props: &ActivityDialogProps) -> Html {
    let on_input = use_game_input();
    let activity = &props.activity;

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_reset = {
        let on_reset = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| on_reset.emit(()))
    };

    let on_complete = {
        let on_complete = props.on_complete.clone();
        let id = activity.id;
        Callback::from(move |_: MouseEvent| on_complete.emit(id))
    };

    html! {
        <div class="codequest-dialog__backdrop">
            <div class="codequest-dialog" role="dialog">
                <div class="codequest-dialog__header">
                    <h2 class="codequest-dialog__title">{&activity.title}</h2>
                    <button class="codequest-btn codequest-btn--icon" onclick={on_close}>
                        {"✕"}
                    </button>
                </div>
                <p class="codequest-dialog__description">{&activity.description}</p>

                <FeedbackBanner feedback={props.session.feedback.clone()} />

                <div class="codequest-dialog__game" key={props.session.session_id.to_string()}>
                    <GameWidget view={props.session.game.clone()} {on_input} />
                </div>

                <div class="codequest-dialog__actions">
                    <button class="codequest-btn" onclick={on_reset}>{"Reset"}</button>
                    {if props.completed {
                        html! {
                            <span class="codequest-dialog__done">
                                {format!("✅ Completed ({} pts)", activity.points)}
                            </span>
                        }
                    } else {
                        html! {
                            <button class="codequest-btn codequest-btn--success" onclick={on_complete}>
                                {"Complete Activity"}
                            </button>
                        }
                    }}
                </div>
            </div>
        </div>
    }
}

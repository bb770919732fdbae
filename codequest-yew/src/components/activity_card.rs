use codequest_core::{ActivityId, ActivityView, Difficulty};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ActivityCardProps {
    pub activity: ActivityView,
    pub on_open: Callback<ActivityId>,
}

fn difficulty_class(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => "beginner",
        Difficulty::Intermediate => "intermediate",
        Difficulty::Advanced => "advanced",
    }
}

/// One catalog entry
#[function_component(ActivityCard)]
pub fn activity_card(props: &ActivityCardProps) -> Html {
    let activity = &props.activity;

    let onclick = {
        let on_open = props.on_open.clone();
        let id = activity.id;
        Callback::from(move |_: MouseEvent| on_open.emit(id))
    };

    html! {
        <div class={classes!(
            "codequest-card",
            activity.completed.then_some("codequest-card--completed")
        )}>
            <div class="codequest-card__header">
                <h3 class="codequest-card__title">{&activity.title}</h3>
                {if activity.completed {
                    html! { <span class="codequest-card__done">{"✅"}</span> }
                } else {
                    html! {}
                }}
            </div>
            <p class="codequest-card__description">{&activity.description}</p>
            <div class="codequest-card__meta">
                <span class={classes!("codequest-badge", difficulty_class(activity.difficulty))}>
                    {activity.difficulty.to_string()}
                </span>
                <span class="codequest-badge">{&activity.category}</span>
                <span class="codequest-card__time">{"⏱ "}{&activity.estimated_time}</span>
                <span class="codequest-card__points">{format!("{} pts", activity.points)}</span>
            </div>
            <button class="codequest-btn codequest-btn--primary" {onclick}>
                {if activity.completed { "Play again" } else { "Start" }}
            </button>
        </div>
    }
}

use crate::components::{ActivityDialog, ActivityGrid, CelebrationBanner, ProgressSummary};
use crate::hooks::use_activities;
use codequest_core::{ActivityCommand, ActivityId};
use yew::prelude::*;

#[function_component(ActivitiesPage)]
pub fn activities_page() -> Html {
    let activities = use_activities();
    let snapshot = &activities.snapshot;

    // ===== CALLBACKS =====

    let on_open = {
        let send_command = activities.send_command.clone();
        Callback::from(move |activity_id: ActivityId| {
            send_command(ActivityCommand::OpenActivity { activity_id });
        })
    };

    let on_close = {
        let send_command = activities.send_command.clone();
        Callback::from(move |_: ()| send_command(ActivityCommand::CloseActivity))
    };

    let on_reset = {
        let send_command = activities.send_command.clone();
        Callback::from(move |_: ()| send_command(ActivityCommand::ResetGame))
    };

    let on_complete = {
        let send_command = activities.send_command.clone();
        Callback::from(move |activity_id: ActivityId| {
            send_command(ActivityCommand::CompleteActivity { activity_id });
        })
    };

    let on_retry = {
        let retry_awards = activities.retry_awards.clone();
        Callback::from(move |_: ()| retry_awards())
    };

    // ===== RENDER =====

    html! {
        <div class="codequest-page">
            <header class="codequest-page__header">
                <h1>{"Coding Activities"}</h1>
                <ProgressSummary
                    completed={snapshot.completed_count}
                    total={snapshot.activities.len()}
                    points={snapshot.total_points}
                    percent={snapshot.percent_complete()}
                    unsaved_awards={activities.unsaved_awards}
                    offline={activities.offline}
                    {on_retry}
                />
            </header>

            <CelebrationBanner celebration={activities.celebration.clone()} />

            <ActivityGrid
                activities={snapshot.activities.clone()}
                categories={snapshot.categories()}
                {on_open}
            />

            {match (&snapshot.open, &snapshot.session) {
                (Some(activity), Some(session)) => {
                    let completed = snapshot
                        .activities
                        .iter()
                        .any(|view| view.id == activity.id && view.completed);
                    html! {
                        <ActivityDialog
                            activity={activity.clone()}
                            session={session.clone()}
                            {completed}
                            {on_close}
                            {on_reset}
                            {on_complete}
                        />
                    }
                }
                _ => html! {},
            }}
        </div>
    }
}

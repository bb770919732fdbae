use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProgressSummaryProps {
    pub completed: usize,
    pub total: usize,
    pub points: u64,
    pub percent: u8,
    #[prop_or_default]
    pub unsaved_awards: usize,
    #[prop_or_default]
    pub offline: bool,
    pub on_retry: Callback<()>,
}

/// Completed count, earned points and a progress bar
#[function_component(ProgressSummary)]
pub fn progress_summary(props: &ProgressSummaryProps) -> Html {
    let on_retry = {
        let on_retry = props.on_retry.clone();
        Callback::from(move |_: MouseEvent| on_retry.emit(()))
    };

    html! {
        <div class="codequest-progress">
            <div class="codequest-progress__stats">
                <span>{format!("{} / {} completed", props.completed, props.total)}</span>
                <span>{format!("⭐ {} points", props.points)}</span>
                {if props.offline {
                    html! { <span class="codequest-progress__offline">{"offline"}</span> }
                } else {
                    html! {}
                }}
            </div>
            <div class="codequest-progress__bar">
                <div
                    class="codequest-progress__fill"
                    style={format!("width: {}%", props.percent)}
                />
            </div>
            {if props.unsaved_awards > 0 {
                html! {
                    <div class="codequest-progress__unsaved">
                        <span>{format!("⚠️ {} awards not saved", props.unsaved_awards)}</span>
                        <button class="codequest-btn" onclick={on_retry}>{"Retry"}</button>
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}

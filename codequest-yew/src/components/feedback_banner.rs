use codequest_core::{Feedback, FeedbackKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FeedbackBannerProps {
    pub feedback: Option<Feedback>,
}

/// Inline game feedback; the session clears it after a short delay
#[function_component(FeedbackBanner)]
pub fn feedback_banner(props: &FeedbackBannerProps) -> Html {
    let Some(feedback) = &props.feedback else {
        return html! {};
    };

    let (modifier, icon) = match feedback.kind {
        FeedbackKind::Success => ("success", "✅"),
        FeedbackKind::Error => ("error", "❌"),
        FeedbackKind::Info => ("info", "ℹ️"),
    };

    html! {
        <div class={classes!("codequest-feedback", format!("codequest-feedback--{}", modifier))}>
            <span class="codequest-feedback__icon">{icon}</span>
            <span class="codequest-feedback__message">{&feedback.message}</span>
        </div>
    }
}

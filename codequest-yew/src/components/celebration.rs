use crate::hooks::Celebration;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CelebrationBannerProps {
    pub celebration: Option<Celebration>,
}

#[function_component(CelebrationBanner)]
pub fn celebration_banner(props: &CelebrationBannerProps) -> Html {
    match &props.celebration {
        Some(celebration) => html! {
            <div class="codequest-celebration" role="status">
                <span class="codequest-celebration__icon">{"🎉"}</span>
                <span class="codequest-celebration__title">
                    {format!("{} complete!", celebration.title)}
                </span>
                <span class="codequest-celebration__points">
                    {format!("+{} XP", celebration.points)}
                </span>
            </div>
        },
        None => html! {},
    }
}

use super::ActivityCard;
use codequest_core::{ActivityId, ActivityView};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ActivityGridProps {
    pub activities: Vec<ActivityView>,
    pub categories: Vec<String>,
    pub on_open: Callback<ActivityId>,
}

fn matches_filter(activity: &ActivityView, filter: Option<&str>) -> bool {
    filter.map_or(true, |category| {
        activity.category.eq_ignore_ascii_case(category)
    })
}

/// Catalog grid with a category filter
#[function_component(ActivityGrid)]
pub fn activity_grid(props: &ActivityGridProps) -> Html {
    let filter = use_state(|| None::<String>);

    let tab = |label: &str, value: Option<String>| {
        let active = *filter == value;
        let onclick = {
            let filter = filter.clone();
            Callback::from(move |_: MouseEvent| filter.set(value.clone()))
        };
        html! {
            <button
                class={classes!("codequest-tab", active.then_some("codequest-tab--active"))}
                {onclick}
            >
                {label.to_string()}
            </button>
        }
    };

    let visible: Vec<&ActivityView> = props
        .activities
        .iter()
        .filter(|activity| matches_filter(activity, filter.as_deref()))
        .collect();

    html! {
        <div class="codequest-grid">
            <div class="codequest-grid__tabs">
                {tab("All", None)}
                {for props.categories.iter().map(|c| tab(c, Some(c.clone())))}
            </div>
            {if visible.is_empty() {
                html! { <p class="codequest-grid__empty">{"No activities in this category"}</p> }
            } else {
                html! {
                    <div class="codequest-grid__items">
                        {for visible.into_iter().map(|activity| html! {
                            <ActivityCard
                                key={activity.id}
                                activity={activity.clone()}
                                on_open={props.on_open.clone()}
                            />
                        })}
                    </div>
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codequest_core::ActivityCatalog;

    #[test]
    fn test_filter_is_case_insensitive() {
        let catalog = ActivityCatalog::builtin();
        let view = catalog.activities()[0].view(false);
        let category = view.category.to_uppercase();

        assert!(matches_filter(&view, None));
        assert!(matches_filter(&view, Some(&category)));
        assert!(!matches_filter(&view, Some("no such category")));
    }
}

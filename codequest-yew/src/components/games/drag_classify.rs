use codequest_core::games::{DragClassifyInput, DragClassifyPhase, DragClassifyView};
use codequest_core::GameInput;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DragClassifyBoardProps {
    pub view: DragClassifyView,
    pub on_input: Callback<GameInput>,
}

/// Drag an item onto a bin, or click the item and then the bin
#[function_component(DragClassifyBoard)]
pub fn drag_classify_board(props: &DragClassifyBoardProps) -> Html {
    let view = &props.view;
    let held = use_state(|| None::<usize>);

    let drop_on = |bin: usize| {
        let held = held.clone();
        let on_input = props.on_input.clone();
        move || {
            if let Some(item) = *held {
                on_input.emit(DragClassifyInput::Drop { item, bin }.into());
                held.set(None);
            }
        }
    };

    html! {
        <div class="codequest-sorter">
            <p>{format!("Sorted {} / {}", view.sorted, view.total)}</p>
            <div class="codequest-sorter__pending">
                {for view.pending.iter().map(|item| {
                    let id = item.id;
                    let ondragstart = {
                        let held = held.clone();
                        Callback::from(move |_: DragEvent| held.set(Some(id)))
                    };
                    let onclick = {
                        let held = held.clone();
                        Callback::from(move |_: MouseEvent| held.set(Some(id)))
                    };
                    html! {
                        <div
                            key={id}
                            class={classes!(
                                "codequest-sort-item",
                                (*held == Some(id)).then_some("codequest-sort-item--held")
                            )}
                            draggable="true"
                            {ondragstart}
                            {onclick}
                        >
                            {&item.label}
                        </div>
                    }
                })}
            </div>
            <div class="codequest-sorter__bins">
                {for view.categories.iter().enumerate().map(|(bin, category)| {
                    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
                    let ondrop = {
                        let drop_item = drop_on(bin);
                        Callback::from(move |e: DragEvent| {
                            e.prevent_default();
                            drop_item();
                        })
                    };
                    let onclick = {
                        let drop_item = drop_on(bin);
                        Callback::from(move |_: MouseEvent| drop_item())
                    };
                    let count = view.buckets.get(bin).map_or(0, Vec::len);
                    html! {
                        <div class="codequest-bin" {ondragover} {ondrop} {onclick}>
                            <span class="codequest-bin__label">{category}</span>
                            <span class="codequest-bin__count">{count.to_string()}</span>
                        </div>
                    }
                })}
            </div>
            {if view.phase == DragClassifyPhase::Completed {
                html! { <p class="codequest-sorter__done">{"All sorted!"}</p> }
            } else {
                html! {}
            }}
        </div>
    }
}

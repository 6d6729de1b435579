//! List of shapes in document order with reorder and delete controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! The first row is drawn on top. Buttons queue `SceneCommand`s rather than
//! editing the snapshot, so the engine stays the single owner of the list.

use leptos::prelude::*;

use crate::state::scene::{SceneCommand, SceneState, ShapeRow};

/// Element list panel.
#[component]
pub fn ElementList() -> impl IntoView {
    let scene = expect_context::<RwSignal<SceneState>>();

    let rows = move || scene.with(SceneState::rows);

    view! {
        <div class="element-list">
            <h2 class="panel__title">"Elements"</h2>
            <ul class="element-list__rows">
                <For each=rows key=|row| (row.id, row.index, row.selected) let:row>
                    <ElementRow row=row/>
                </For>
            </ul>
        </div>
    }
}

#[component]
fn ElementRow(row: ShapeRow) -> impl IntoView {
    let scene = expect_context::<RwSignal<SceneState>>();
    let ShapeRow { id, index, label, selected } = row;

    let can_move_up = move || scene.with(|s| s.can_move_up(index));
    let can_move_down = move || scene.with(|s| s.can_move_down(index));

    view! {
        <li class="element-list__row" class:element-list__row--selected=selected>
            <button class="element-list__label" on:click=move |_| scene.update(|s| s.push(SceneCommand::Select(id)))>
                {label}
            </button>
            <button
                class="btn element-list__up"
                title="Bring forward"
                disabled=move || !can_move_up()
                on:click=move |_| scene.update(|s| s.push(SceneCommand::Reorder { from: index, to: index.saturating_sub(1) }))
            >
                "▲"
            </button>
            <button
                class="btn element-list__down"
                title="Send backward"
                disabled=move || !can_move_down()
                on:click=move |_| scene.update(|s| s.push(SceneCommand::Reorder { from: index, to: index + 1 }))
            >
                "▼"
            </button>
            <button
                class="btn element-list__delete"
                title="Delete"
                on:click=move |_| scene.update(|s| s.push(SceneCommand::Delete(id)))
            >
                "✕"
            </button>
        </li>
    }
}

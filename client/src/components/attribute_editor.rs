//! Attribute form for the selected shape.
//!
//! SYSTEM CONTEXT
//! ==============
//! One text input per attribute entry (geometry first, then style). A change
//! queues a `SetAttribute` command. Values the engine rejects leave the shape
//! untouched and surface as an inline error. Rows are keyed on the rejection
//! count, so a rejected input is rebuilt with the stored value.

use leptos::prelude::*;

use canvas::doc::ShapeId;

use crate::state::scene::{SceneCommand, SceneState};

/// Attribute editor panel.
#[component]
pub fn AttributeEditor() -> impl IntoView {
    let scene = expect_context::<RwSignal<SceneState>>();

    let title = move || {
        scene.with(|s| s.selected_shape().map_or_else(|| "No selection".to_owned(), |shape| shape.label()))
    };
    let entries = move || {
        scene.with(|s| {
            s.selected_shape()
                .map(|shape| {
                    shape
                        .attribute_entries()
                        .into_iter()
                        .map(|(key, value)| (shape.id, key, value, s.rejected_edits))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };
    let last_error = move || scene.with(|s| s.last_error.clone());

    view! {
        <div class="attribute-editor">
            <h2 class="panel__title">{title}</h2>
            <form class="attribute-editor__form" on:submit=|ev| ev.prevent_default()>
                <For each=entries key=|entry| entry.clone() let:entry>
                    <AttributeField id=entry.0 key=entry.1 value=entry.2/>
                </For>
            </form>
            {move || {
                last_error().map(|message| view! { <p class="attribute-editor__error">{message}</p> })
            }}
        </div>
    }
}

#[component]
fn AttributeField(id: ShapeId, key: String, value: String) -> impl IntoView {
    let scene = expect_context::<RwSignal<SceneState>>();
    let label = key.clone();

    let on_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let key = key.clone();
        scene.update(|s| s.push(SceneCommand::SetAttribute { id, key, value }));
    };

    view! {
        <label class="attribute-editor__field">
            <span class="attribute-editor__key">{label}</span>
            <input class="attribute-editor__input" type="text" prop:value=value on:change=on_change/>
        </label>
    }
}

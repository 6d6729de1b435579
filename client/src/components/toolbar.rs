//! Tool picker shown above the canvas.
//!
//! SYSTEM CONTEXT
//! ==============
//! Writes the active tool into `UiState`; the canvas host forwards it to the
//! engine, and the engine hands control back to Select after each drawing.

use leptos::prelude::*;

use crate::state::ui::{ToolType, UiState};

/// Row of tool buttons with the active one highlighted.
#[component]
pub fn Toolbar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="toolbar">
            {ToolType::ALL
                .into_iter()
                .map(|tool| {
                    let is_active = move || ui.get().active_tool == tool;
                    view! {
                        <button
                            class="btn toolbar__tool"
                            class:toolbar__tool--active=is_active
                            aria-pressed=move || if is_active() { "true" } else { "false" }
                            on:click=move |_| ui.update(|u| u.active_tool = tool)
                        >
                            {tool.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

//! Bottom status bar showing viewport telemetry.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the zoom level and view offset published by the canvas host and
//! offers a one-click return to the initial pan and zoom.

use leptos::prelude::*;

use crate::state::canvas_view::CanvasViewState;
use crate::state::ui::UiState;

/// Status bar below the canvas.
#[component]
pub fn StatusBar() -> impl IntoView {
    let canvas_view = expect_context::<RwSignal<CanvasViewState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let zoom = move || canvas_view.with(CanvasViewState::zoom_label);
    let offset = move || canvas_view.with(CanvasViewState::offset_label);

    view! {
        <div class="status-bar">
            <span class="status-bar__item status-bar__zoom">{zoom}</span>
            <span class="status-bar__item status-bar__offset">{offset}</span>
            <span class="status-bar__spacer"></span>
            <button class="btn status-bar__reset" on:click=move |_| ui.update(UiState::request_home_viewport)>
                "Reset pan & zoom"
            </button>
        </div>
    }
}

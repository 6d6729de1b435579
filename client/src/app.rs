//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::{
    attribute_editor::AttributeEditor, canvas_host::CanvasHost, element_list::ElementList, status_bar::StatusBar,
    toolbar::Toolbar,
};
use crate::state::{canvas_view::CanvasViewState, scene::SceneState, ui::UiState};

/// Root application component.
///
/// Provides all shared state contexts and lays out the editor.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Provide reactive state contexts for all child components.
    let ui = RwSignal::new(UiState::default());
    let scene = RwSignal::new(SceneState::default());
    let canvas_view = RwSignal::new(CanvasViewState::default());

    provide_context(ui);
    provide_context(scene);
    provide_context(canvas_view);

    view! {
        <Title text="Sketchpad"/>

        <div class="editor">
            <Toolbar/>
            <div class="editor__body">
                <ElementList/>
                <div class="editor__stage">
                    <CanvasHost/>
                    <StatusBar/>
                </div>
                <AttributeEditor/>
            </div>
        </div>
    }
}

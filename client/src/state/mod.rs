//! Reactive application state shared through Leptos context.

pub mod canvas_view;
pub mod scene;
pub mod ui;

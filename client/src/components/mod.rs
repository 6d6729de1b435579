//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render editor chrome and the canvas surface while reading and
//! writing shared state from Leptos context providers.

pub mod attribute_editor;
pub mod canvas_host;
pub mod element_list;
pub mod status_bar;
pub mod toolbar;

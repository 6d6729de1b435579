//! Shared helpers for components.

pub mod canvas_input;

//! # client
//!
//! Leptos + WASM frontend for the sketchpad shape editor.
//!
//! This crate contains the editor chrome (toolbar, element list, attribute
//! editor, status bar) and the reactive state those panels share. It
//! integrates with the `canvas` crate for drawing and gesture handling via the
//! `CanvasHost` bridge component.

pub mod app;
pub mod components;
pub mod state;
pub mod util;

//! Canvas engine for the sketchpad shape editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editing model of the canvas: translating raw DOM input events into shape
//! edits, maintaining the viewport for pan/zoom, hit-testing shapes, and
//! rendering the scene. The host UI layer only wires DOM events to the
//! engine and reflects the resulting [`engine::Action`]s in its panels.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Ordered shape list and id allocation |
//! | [`shape`] | Shape geometry, style, patches and attribute form mapping |
//! | [`camera`] | Viewport pan/zoom and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against shapes |
//! | [`render`] | Scene and selection marker rendering |
//! | [`error`] | Engine error type |
//! | [`consts`] | Shared constants (zoom limits, default style, marker timing) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod render;
pub mod shape;

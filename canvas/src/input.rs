//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` captures the user's intent at the time of a pointer event and
//! `Modifiers` decides whether a wheel event zooms. `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. Each active variant carries the content-space start point it
//! needs, so a drag delta can only be computed while a gesture is running.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{ShapeId, ShapeKind};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Draw a rectangle.
    Rect,
    /// Draw a circle.
    Circle,
    /// Draw a regular polygon.
    Polygon,
}

impl Tool {
    /// Kind of shape this tool draws, if it is a drawing tool.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Select => None,
            Self::Rect => Some(ShapeKind::Rect),
            Self::Circle => Some(ShapeKind::Circle),
            Self::Polygon => Some(ShapeKind::Polygon),
        }
    }

    /// CSS cursor shown over the canvas while this tool is idle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Select => "default",
            Self::Rect | Self::Circle | Self::Polygon => "crosshair",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held. Trackpad pinch gestures arrive as ctrl+wheel.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether a wheel event with these modifiers should zoom rather than scroll.
    #[must_use]
    pub fn zooms_wheel(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"x"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active drawing tool.
    pub tool: Tool,
    /// The id of the currently selected shape, if any.
    pub selected_id: Option<ShapeId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas with the middle button.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The user is sizing a freshly created shape.
    Drawing {
        /// Id of the shape being drawn.
        id: ShapeId,
        /// Kind of the shape being drawn.
        kind: ShapeKind,
        /// Content-space press point; the rectangle anchor or the centre.
        start: Point,
    },
    /// The user is dragging an existing shape.
    Moving {
        /// Id of the shape being dragged.
        id: ShapeId,
        /// Content-space press point.
        start: Point,
        /// Shape position before the drag started.
        origin: Point,
    },
}

impl InputState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Shape targeted by the current gesture, if any.
    #[must_use]
    pub fn target(&self) -> Option<ShapeId> {
        match self {
            Self::Drawing { id, .. } | Self::Moving { id, .. } => Some(*id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }
}

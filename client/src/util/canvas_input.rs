//! Canvas input mapping and pointer helper utilities.

#[cfg(test)]
#[path = "canvas_input_test.rs"]
mod canvas_input_test;

use crate::state::ui::ToolType;

use canvas::input::{Button as CanvasButton, Modifiers as CanvasModifiers, Tool as CanvasTool};

#[cfg(feature = "csr")]
use canvas::camera::Point as CanvasPoint;

pub fn map_tool(tool: ToolType) -> CanvasTool {
    match tool {
        ToolType::Select => CanvasTool::Select,
        ToolType::Rectangle => CanvasTool::Rect,
        ToolType::Circle => CanvasTool::Circle,
        ToolType::Polygon => CanvasTool::Polygon,
    }
}

/// Toolbar entry for an engine tool, used when the engine switches tools itself.
pub fn tool_type(tool: CanvasTool) -> ToolType {
    match tool {
        CanvasTool::Select => ToolType::Select,
        CanvasTool::Rect => ToolType::Rectangle,
        CanvasTool::Circle => ToolType::Circle,
        CanvasTool::Polygon => ToolType::Polygon,
    }
}

pub fn map_button(button: i16) -> CanvasButton {
    match button {
        1 => CanvasButton::Middle,
        2 => CanvasButton::Secondary,
        _ => CanvasButton::Primary,
    }
}

pub fn map_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> CanvasModifiers {
    CanvasModifiers { shift, ctrl, alt, meta }
}

/// Keys the canvas consumes, so the browser must not act on them.
pub fn should_prevent_default_key(key: &str) -> bool {
    matches!(key, "Delete" | "x" | "f" | "b")
}

#[cfg(feature = "csr")]
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> CanvasPoint {
    CanvasPoint::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

#[cfg(feature = "csr")]
pub fn wheel_point(ev: &leptos::ev::WheelEvent) -> CanvasPoint {
    CanvasPoint::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

//! Rendering: draws the full canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of document state and camera state and produces
//! pixels; it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::consts::{BACKGROUND_FILL, MARKER_CYCLE_MS, MARKER_DASH_PX, MARKER_DASH_TRAVEL_PX, MARKER_LINE_PX};
use crate::doc::{Bounds, DocStore, Geometry, RectAttrs, Shape, Style};
use crate::shape::polygon_vertices;
use crate::input::UiState;

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

/// Draw the full scene: background, shapes, then the selection marker.
///
/// `dpr` is the device pixel ratio; `now_ms` is a monotonic clock used to
/// animate the marker's dashes.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    doc: &DocStore,
    camera: &Camera,
    ui: &UiState,
    dpr: f64,
    now_ms: f64,
) -> Result<(), JsValue> {
    let (canvas_w, canvas_h) = camera.canvas_size();
    let zoom = camera.zoom();
    let origin = camera.view.origin();

    // Layer 1: clear, background, view transform.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, canvas_w, canvas_h);
    ctx.set_fill_style_str(BACKGROUND_FILL);
    ctx.fill_rect(0.0, 0.0, canvas_w, canvas_h);
    ctx.scale(zoom, zoom)?;
    ctx.translate(-origin.x, -origin.y)?;

    // Layer 2: shapes, last list entry first so index 0 ends up on top.
    for shape in doc.render_order() {
        draw_shape(ctx, shape)?;
    }

    // Layer 3: selection marker.
    if let Some(shape) = ui.selected_id.and_then(|id| doc.get(id)) {
        draw_selection(ctx, shape.geometry.bounds(), camera, now_ms)?;
    }

    Ok(())
}

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
    ctx.begin_path();
    match &shape.geometry {
        Geometry::Rect(rect) => trace_rect(ctx, rect)?,
        Geometry::Circle(circle) => {
            if circle.r <= 0.0 {
                return Ok(());
            }
            ctx.arc(circle.cx, circle.cy, circle.r, 0.0, TAU)?;
        }
        Geometry::Polygon(polygon) => {
            let vertices = polygon_vertices(Point::new(polygon.cx, polygon.cy), polygon.r, polygon.sides);
            trace_polyline(ctx, &vertices);
        }
    }
    paint(ctx, &shape.style);
    Ok(())
}

/// Rectangle outline with optional rounded corners. The radius is clamped to
/// half the shorter side.
fn trace_rect(ctx: &CanvasRenderingContext2d, rect: &RectAttrs) -> Result<(), JsValue> {
    let RectAttrs { x, y, width: w, height: h, corner_radius } = *rect;
    let r = corner_radius.clamp(0.0, (w.min(h) / 2.0).max(0.0));
    if r <= 0.0 {
        ctx.rect(x, y, w, h);
        return Ok(());
    }
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}

fn trace_polyline(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return;
    };
    ctx.move_to(first.x, first.y);
    for pt in iter {
        ctx.line_to(pt.x, pt.y);
    }
    ctx.close_path();
}

/// Fill and stroke the current path. Opacity applies to the fill only.
fn paint(ctx: &CanvasRenderingContext2d, style: &Style) {
    ctx.save();
    ctx.set_global_alpha(style.fill_opacity.clamp(0.0, 1.0));
    ctx.set_fill_style_str(&style.fill);
    ctx.fill();
    ctx.restore();

    if style.stroke_width > 0.0 {
        ctx.set_stroke_style_str(&style.stroke);
        ctx.set_line_width(style.stroke_width);
        ctx.stroke();
    }
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, bounds: Bounds, camera: &Camera, now_ms: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_line_width(camera.screen_dist_to_content(MARKER_LINE_PX));

    // Solid underlay so the dashes read on any background.
    ctx.set_stroke_style_str("#000000");
    ctx.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height);

    let dash = camera.screen_dist_to_content(MARKER_DASH_PX);
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash.into());
    dash_array.push(&dash.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_line_dash_offset(marker_dash_offset(now_ms, camera.zoom()));
    ctx.set_stroke_style_str("#FFFFFF");
    ctx.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height);
    ctx.set_line_dash(&js_sys::Array::new())?;

    ctx.restore();
    Ok(())
}

/// Dash offset of the "marching ants" marker: runs from `10/zoom` down to 0
/// once per cycle.
#[must_use]
pub fn marker_dash_offset(now_ms: f64, zoom: f64) -> f64 {
    let phase = now_ms.rem_euclid(MARKER_CYCLE_MS) / MARKER_CYCLE_MS;
    MARKER_DASH_TRAVEL_PX / zoom * (1.0 - phase)
}

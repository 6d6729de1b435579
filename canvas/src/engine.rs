use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{DEFAULT_POLYGON_SIDES, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::doc::{
    CirclePatch, DocStore, Geometry, PolygonPatch, RectPatch, Shape, ShapeId, ShapeKind, ShapePatch, Style,
};
use crate::error::EngineError;
use crate::hit;
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShapeCreated(Shape),
    ShapeUpdated { id: ShapeId },
    ShapeDeleted { id: ShapeId },
    ShapesReordered { from: usize, to: usize },
    SelectionChanged(Option<ShapeId>),
    ToolChanged(Tool),
    ViewChanged(Viewport),
    SetCursor(&'static str),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: DocStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine holding the starter scene, with the circle selected.
    #[must_use]
    pub fn with_demo_scene() -> Self {
        let doc = DocStore::demo();
        let selected_id = doc.shapes().iter().find(|s| s.kind() == ShapeKind::Circle).map(|s| s.id);
        Self { doc, ui: UiState { selected_id, ..UiState::default() }, ..Self::default() }
    }

    // --- Viewport ---

    /// Update the canvas size (CSS pixels) and device pixel ratio.
    pub fn set_canvas_size(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.camera.set_canvas_size(width_css, height_css);
        self.dpr = dpr;
    }

    /// Restore the initial pan and zoom.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera.reset();
        vec![Action::ViewChanged(self.camera.view), Action::RenderNeeded]
    }

    // --- Tool / selection ---

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.ui.tool = tool;
        vec![Action::SetCursor(self.cursor())]
    }

    /// Select a shape, or clear the selection with `None`. Unknown ids are ignored.
    pub fn select(&mut self, id: Option<ShapeId>) -> Vec<Action> {
        if let Some(id) = id
            && self.doc.get(id).is_none()
        {
            log::trace!("ignoring selection of missing shape {id}");
            return Vec::new();
        }
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    // --- Document edits ---

    /// Delete a shape. Clears the selection and any gesture that targeted it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        let mut actions = vec![Action::ShapeDeleted { id }];
        if self.ui.selected_id == Some(id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        if self.input.target() == Some(id) {
            actions.extend(self.drop_gesture());
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Move the shape at list index `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexOutOfRange`] if either index is past the end.
    pub fn reorder_shape(&mut self, from: usize, to: usize) -> Result<Vec<Action>, EngineError> {
        self.doc.reorder(from, to)?;
        Ok(vec![Action::ShapesReordered { from, to }, Action::RenderNeeded])
    }

    /// Merge a typed patch into a shape. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::KindMismatch`] if the geometry patch is for another kind.
    pub fn update_shape(&mut self, id: ShapeId, patch: &ShapePatch) -> Result<Vec<Action>, EngineError> {
        if self.doc.apply_patch(id, patch)? {
            Ok(vec![Action::ShapeUpdated { id }, Action::RenderNeeded])
        } else {
            Ok(Vec::new())
        }
    }

    /// Set one attribute from the attribute form. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns the parse error for unknown keys or malformed values.
    pub fn set_attribute(&mut self, id: ShapeId, key: &str, raw: &str) -> Result<Vec<Action>, EngineError> {
        if self.doc.set_attribute(id, key, raw)? {
            Ok(vec![Action::ShapeUpdated { id }, Action::RenderNeeded])
        } else {
            Ok(Vec::new())
        }
    }

    // --- Input events ---

    /// Start a gesture. Presses during an active gesture are ignored.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if self.input.is_active() {
            log::trace!("ignoring {button:?} press during {:?}", self.input);
            return Vec::new();
        }
        match button {
            Button::Middle => {
                self.input = InputState::Panning { last_screen: screen_pt };
                Vec::new()
            }
            Button::Secondary => Vec::new(),
            Button::Primary => {
                let pt = self.camera.screen_to_content(screen_pt);
                if let Some(kind) = self.ui.tool.shape_kind() {
                    return self.begin_drawing(kind, pt);
                }
                match hit::hit_test(pt, &self.doc) {
                    Some(id) => self.begin_moving(id, pt),
                    None => self.select(None),
                }
            }
        }
    }

    /// Advance the active gesture.
    ///
    /// # Errors
    ///
    /// Returns an error if the gesture's shape disappeared or changed kind
    /// mid-gesture. The gesture is abandoned in that case.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Result<Vec<Action>, EngineError> {
        match self.input.clone() {
            InputState::Idle => Ok(Vec::new()),
            InputState::Panning { last_screen } => {
                self.camera.pan_by_pixels(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen_pt };
                Ok(vec![Action::ViewChanged(self.camera.view), Action::RenderNeeded])
            }
            InputState::Drawing { id, kind, start } => {
                let pt = self.camera.screen_to_content(screen_pt);
                let patch = self.draw_patch(id, kind, start, pt)?;
                self.apply_gesture_patch(id, &patch)
            }
            InputState::Moving { id, start, origin } => {
                let pt = self.camera.screen_to_content(screen_pt);
                let to = Point::new(origin.x + pt.x - start.x, origin.y + pt.y - start.y);
                let Some(shape) = self.doc.get(id) else {
                    return Err(self.abandon_gesture(EngineError::ShapeNotFound(id)));
                };
                let patch = ShapePatch::from(shape.geometry.move_patch(to));
                self.apply_gesture_patch(id, &patch)
            }
        }
    }

    /// End the active gesture. Finishing a drawing returns to the Select tool.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::Panning { .. } => Vec::new(),
            InputState::Drawing { id, .. } => {
                log::debug!("finished drawing shape {id}");
                self.ui.tool = Tool::Select;
                vec![Action::ToolChanged(Tool::Select), Action::SetCursor(self.cursor()), Action::RenderNeeded]
            }
            InputState::Moving { id, .. } => {
                log::debug!("finished moving shape {id}");
                vec![Action::SetCursor(self.cursor()), Action::RenderNeeded]
            }
        }
    }

    /// Zoom at the pointer when ctrl/meta is held (trackpad pinch), otherwise scroll.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.zooms_wheel() {
            if delta.dy == 0.0 {
                return Vec::new();
            }
            let factor = if delta.dy < 0.0 { 1.0 - ZOOM_STEP } else { 1.0 + ZOOM_STEP };
            let next = self.camera.zoom_after(factor);
            if !(MIN_ZOOM..=MAX_ZOOM).contains(&next) {
                log::trace!("zoom {next} outside limits, ignoring wheel step");
                return Vec::new();
            }
            self.camera.zoom_at(factor, screen_pt);
        } else {
            self.camera.scroll_by_pixels(delta.dx, delta.dy);
        }
        vec![Action::ViewChanged(self.camera.view), Action::RenderNeeded]
    }

    /// Keyboard shortcuts on the selected shape: `Delete`/`x` deletes, `f`
    /// brings it one step forward (towards index 0), `b` sends it one step back.
    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        match key.0.as_str() {
            "Delete" | "x" => self.remove_shape(id),
            "f" | "b" => {
                let Some(index) = self.doc.index_of(id) else {
                    return Vec::new();
                };
                let target = if key.0 == "b" { index.checked_add(1) } else { index.checked_sub(1) };
                match target {
                    Some(to) if to < self.doc.len() => {
                        self.reorder_shape(index, to).unwrap_or_else(|err| {
                            log::warn!("reorder failed: {err}");
                            Vec::new()
                        })
                    }
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    /// The currently selected shape, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.ui.selected_id
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    /// Look up a shape by ID.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.doc.get(id)
    }

    /// Shapes in list order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.doc.shapes()
    }

    /// CSS cursor for the current tool and gesture.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match self.input {
            InputState::Moving { .. } => "grab",
            _ => self.ui.tool.cursor(),
        }
    }

    // --- Gesture internals ---

    fn begin_drawing(&mut self, kind: ShapeKind, pt: Point) -> Vec<Action> {
        let geometry = match kind {
            ShapeKind::Rect => Geometry::rect_at(pt),
            ShapeKind::Circle => Geometry::circle_at(pt),
            ShapeKind::Polygon => Geometry::polygon_at(pt, DEFAULT_POLYGON_SIDES),
        };
        let id = self.doc.create(geometry, Style::default());
        self.input = InputState::Drawing { id, kind, start: pt };
        log::debug!("drawing {kind} {id} from ({}, {})", pt.x, pt.y);
        let mut actions = Vec::with_capacity(2);
        if let Some(shape) = self.doc.get(id) {
            actions.push(Action::ShapeCreated(shape.clone()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn begin_moving(&mut self, id: ShapeId, pt: Point) -> Vec<Action> {
        let Some(origin) = self.doc.position_of(id) else {
            return Vec::new();
        };
        let mut actions = self.select(Some(id));
        self.input = InputState::Moving { id, start: pt, origin };
        log::debug!("moving shape {id}");
        actions.push(Action::SetCursor(self.cursor()));
        actions
    }

    /// Geometry patch for a drawing gesture with the pointer at `pt`.
    fn draw_patch(&mut self, id: ShapeId, kind: ShapeKind, start: Point, pt: Point) -> Result<ShapePatch, EngineError> {
        match kind {
            ShapeKind::Rect => Ok(RectPatch {
                x: Some(start.x.min(pt.x)),
                y: Some(start.y.min(pt.y)),
                width: Some((pt.x - start.x).abs()),
                height: Some((pt.y - start.y).abs()),
                corner_radius: None,
            }
            .into()),
            ShapeKind::Circle | ShapeKind::Polygon => {
                let Some(center) = self.doc.position_of(id) else {
                    return Err(self.abandon_gesture(EngineError::ShapeNotFound(id)));
                };
                let r = Some(center.distance_to(pt));
                Ok(match kind {
                    ShapeKind::Polygon => PolygonPatch { r, ..Default::default() }.into(),
                    _ => CirclePatch { r, ..Default::default() }.into(),
                })
            }
        }
    }

    fn apply_gesture_patch(&mut self, id: ShapeId, patch: &ShapePatch) -> Result<Vec<Action>, EngineError> {
        match self.doc.apply_patch(id, patch) {
            Ok(true) => Ok(vec![Action::ShapeUpdated { id }, Action::RenderNeeded]),
            Ok(false) => Err(self.abandon_gesture(EngineError::ShapeNotFound(id))),
            Err(err) => Err(self.abandon_gesture(err)),
        }
    }

    /// End the active gesture without finishing it. An unfinished drawing
    /// still hands the tool back to Select, as a release would.
    fn drop_gesture(&mut self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(2);
        if let InputState::Drawing { .. } = std::mem::take(&mut self.input) {
            self.ui.tool = Tool::Select;
            actions.push(Action::ToolChanged(Tool::Select));
        }
        actions.push(Action::SetCursor(self.cursor()));
        actions
    }

    fn abandon_gesture(&mut self, err: EngineError) -> EngineError {
        log::warn!("abandoning {:?}: {err}", self.input);
        self.drop_gesture();
        err
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to the given canvas element, seeded with the starter scene.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let mut core = EngineCore::with_demo_scene();
        core.set_canvas_size(f64::from(canvas.width()), f64::from(canvas.height()), 1.0);
        Self { canvas, core }
    }

    // --- Delegated viewport / edits ---

    /// Update canvas CSS size and device pixel ratio; resizes the backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_canvas_size(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.canvas.set_width((width_css * dpr).round() as u32);
        self.canvas.set_height((height_css * dpr).round() as u32);
        self.core.set_canvas_size(width_css, height_css, dpr);
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.core.reset_view()
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn select(&mut self, id: Option<ShapeId>) -> Vec<Action> {
        self.core.select(id)
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Vec<Action> {
        self.core.remove_shape(id)
    }

    /// # Errors
    ///
    /// See [`EngineCore::reorder_shape`].
    pub fn reorder_shape(&mut self, from: usize, to: usize) -> Result<Vec<Action>, EngineError> {
        self.core.reorder_shape(from, to)
    }

    /// # Errors
    ///
    /// See [`EngineCore::set_attribute`].
    pub fn set_attribute(&mut self, id: ShapeId, key: &str, raw: &str) -> Result<Vec<Action>, EngineError> {
        self.core.set_attribute(id, key, raw)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    /// # Errors
    ///
    /// See [`EngineCore::on_pointer_move`].
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Result<Vec<Action>, EngineError> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        self.core.on_key_down(key)
    }

    // --- Render ---

    /// Draw the current state to the canvas. `now_ms` drives the selection marker animation.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self, now_ms: f64) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        render::draw(&ctx, &self.core.doc, &self.core.camera, &self.core.ui, self.core.dpr, now_ms)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.core.tool()
    }

    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.core.shape(id)
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        self.core.shapes()
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.core.cursor()
    }
}

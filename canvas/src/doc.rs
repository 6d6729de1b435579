//! Document store: the ordered shape list and id allocation.
//!
//! List order is significant. Index 0 is listed first and drawn last, so it
//! sits visually on top; `render_order` walks the list in reverse and
//! hit-testing walks it forwards. New shapes are appended.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

pub use crate::shape::{
    Bounds, CircleAttrs, CirclePatch, Geometry, GeometryPatch, PolygonAttrs, PolygonPatch, RectAttrs, RectPatch, Shape,
    ShapeId, ShapeKind, ShapePatch, Style, StylePatch,
};

use crate::camera::Point;
use crate::error::EngineError;

/// In-memory, ordered store of shapes.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    shapes: Vec<Shape>,
    next_id: u64,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the starter scene: a hexagon, a circle and a rectangle.
    #[must_use]
    pub fn demo() -> Self {
        let mut doc = Self::new();
        doc.create(
            Geometry::Polygon(PolygonAttrs { cx: 150.0, cy: 150.0, r: 30.0, sides: 6 }),
            Style { fill: "#00dd00".to_owned(), fill_opacity: 1.0, stroke: "#800080".to_owned(), ..Style::default() },
        );
        doc.create(
            Geometry::Circle(CircleAttrs { cx: 150.0, cy: 150.0, r: 50.0 }),
            Style { fill: "#FF0000".to_owned(), fill_opacity: 1.0, ..Style::default() },
        );
        doc.create(
            Geometry::Rect(RectAttrs { x: 50.0, y: 50.0, width: 200.0, height: 100.0, corner_radius: 0.0 }),
            Style { fill: "#BBC42A".to_owned(), fill_opacity: 1.0, stroke_width: 0.0, ..Style::default() },
        );
        doc
    }

    /// Append a new shape with a freshly allocated id.
    pub fn create(&mut self, geometry: Geometry, style: Style) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.push(Shape { id, geometry, style });
        id
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    /// Return a reference to a shape by id.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// List position of a shape.
    #[must_use]
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    /// Apply a typed patch. Returns `Ok(false)` if the shape doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::KindMismatch`] if the geometry patch is for another kind.
    pub fn apply_patch(&mut self, id: ShapeId, patch: &ShapePatch) -> Result<bool, EngineError> {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        shape.apply(patch)?;
        Ok(true)
    }

    /// Set one form attribute from its text value. Returns `Ok(false)` if the shape doesn't exist.
    ///
    /// # Errors
    ///
    /// Propagates parse failures from [`Shape::with_attribute`]; the shape is unchanged.
    pub fn set_attribute(&mut self, id: ShapeId, key: &str, raw: &str) -> Result<bool, EngineError> {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        *shape = shape.with_attribute(key, raw)?;
        Ok(true)
    }

    /// Move the shape at `from` to `to`, shifting the shapes in between.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexOutOfRange`] if either index is past the end.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), EngineError> {
        let len = self.shapes.len();
        for index in [from, to] {
            if index >= len {
                return Err(EngineError::IndexOutOfRange { index, len });
            }
        }
        let shape = self.shapes.remove(from);
        self.shapes.insert(to, shape);
        Ok(())
    }

    /// Shapes in list order (index 0 on top).
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shapes in draw order: last in the list first, index 0 last.
    pub fn render_order(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().rev()
    }

    /// Drag position of a shape: rectangle top-left or circle/polygon centre.
    #[must_use]
    pub fn position_of(&self, id: ShapeId) -> Option<Point> {
        self.get(id).map(|s| s.geometry.position())
    }

    /// Number of shapes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

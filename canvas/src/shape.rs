//! Shape model: per-kind geometry, shared style, typed patches, and the
//! string-keyed attribute form used by the attribute editor.
//!
//! Geometry is a tagged enum with one attribute struct per kind, so gesture
//! code patches a rectangle with a `RectPatch` and cannot name a radius on it.
//! The attribute form goes through serde instead: attributes serialize to a
//! JSON object with camelCase keys, a single edited key is merged in, and the
//! object deserializes back into the typed struct.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::f64::consts::PI;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::camera::Point;
use crate::consts::{
    DEFAULT_FILL, DEFAULT_FILL_OPACITY, DEFAULT_STROKE, DEFAULT_STROKE_WIDTH, MIN_POLYGON_SIDES,
};
use crate::error::EngineError;

/// Unique identifier for a shape. Allocated by the document store, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Circle around a centre point.
    Circle,
    /// Regular polygon inscribed in a circle.
    Polygon,
}

impl ShapeKind {
    /// Short lowercase name used in element labels.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RectAttrs {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CircleAttrs {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PolygonAttrs {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub sides: u32,
}

/// Per-kind geometric attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rect(RectAttrs),
    Circle(CircleAttrs),
    Polygon(PolygonAttrs),
}

/// Axis-aligned bounding box in content space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Zero-size rectangle anchored at `at`.
    #[must_use]
    pub fn rect_at(at: Point) -> Self {
        Self::Rect(RectAttrs { x: at.x, y: at.y, width: 0.0, height: 0.0, corner_radius: 0.0 })
    }

    /// Zero-radius circle centred at `at`.
    #[must_use]
    pub fn circle_at(at: Point) -> Self {
        Self::Circle(CircleAttrs { cx: at.x, cy: at.y, r: 0.0 })
    }

    /// Zero-radius polygon centred at `at`.
    #[must_use]
    pub fn polygon_at(at: Point, sides: u32) -> Self {
        Self::Polygon(PolygonAttrs { cx: at.x, cy: at.y, r: 0.0, sides })
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect(_) => ShapeKind::Rect,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// The point a move gesture drags: top-left for rectangles, centre otherwise.
    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Self::Rect(a) => Point::new(a.x, a.y),
            Self::Circle(a) => Point::new(a.cx, a.cy),
            Self::Polygon(a) => Point::new(a.cx, a.cy),
        }
    }

    /// Patch that moves [`Geometry::position`] to `to`.
    #[must_use]
    pub fn move_patch(&self, to: Point) -> GeometryPatch {
        match self {
            Self::Rect(_) => GeometryPatch::Rect(RectPatch { x: Some(to.x), y: Some(to.y), ..RectPatch::default() }),
            Self::Circle(_) => GeometryPatch::Circle(CirclePatch { cx: Some(to.x), cy: Some(to.y), r: None }),
            Self::Polygon(_) => {
                GeometryPatch::Polygon(PolygonPatch { cx: Some(to.x), cy: Some(to.y), ..PolygonPatch::default() })
            }
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Rect(a) => Bounds { x: a.x, y: a.y, width: a.width, height: a.height },
            Self::Circle(a) => Bounds { x: a.cx - a.r, y: a.cy - a.r, width: a.r * 2.0, height: a.r * 2.0 },
            Self::Polygon(a) => {
                let points = polygon_vertices(Point::new(a.cx, a.cy), a.r, a.sides);
                if points.is_empty() {
                    return Bounds { x: a.cx, y: a.cy, width: 0.0, height: 0.0 };
                }
                let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
                let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
                for p in &points {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                }
                Bounds { x: min_x, y: min_y, width: max_x - min_x, height: max_y - min_y }
            }
        }
    }

    /// Apply a geometry patch of the same kind. A rejected patch leaves the
    /// geometry untouched.
    fn apply(&mut self, id: ShapeId, patch: &GeometryPatch) -> Result<(), EngineError> {
        match (self, patch) {
            (Self::Rect(a), GeometryPatch::Rect(p)) => {
                set(&mut a.x, p.x);
                set(&mut a.y, p.y);
                set(&mut a.width, p.width);
                set(&mut a.height, p.height);
                set(&mut a.corner_radius, p.corner_radius);
                Ok(())
            }
            (Self::Circle(a), GeometryPatch::Circle(p)) => {
                set(&mut a.cx, p.cx);
                set(&mut a.cy, p.cy);
                set(&mut a.r, p.r);
                Ok(())
            }
            (Self::Polygon(a), GeometryPatch::Polygon(p)) => {
                if let Some(sides) = p.sides
                    && sides < MIN_POLYGON_SIDES
                {
                    return Err(EngineError::InvalidSides { min: MIN_POLYGON_SIDES, value: sides.to_string() });
                }
                set(&mut a.cx, p.cx);
                set(&mut a.cy, p.cy);
                set(&mut a.r, p.r);
                set(&mut a.sides, p.sides);
                Ok(())
            }
            (this, patch) => Err(EngineError::KindMismatch { id, expected: patch.kind(), found: this.kind() }),
        }
    }
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *field = v;
    }
}

/// Vertices of a regular polygon, closing back on the first vertex.
///
/// The first vertex sits at angle `180/sides + 90` degrees so that polygons
/// rest on a flat bottom edge.
#[must_use]
pub fn polygon_vertices(center: Point, r: f64, sides: u32) -> Vec<Point> {
    if sides == 0 {
        return Vec::new();
    }
    let n = f64::from(sides);
    let step = 2.0 * PI / n;
    let shift = (180.0 / n + 90.0).to_radians();
    (0..=sides)
        .map(|i| {
            let angle = f64::from(i) * step + shift;
            Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect()
}

/// Shared fill and stroke attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Style {
    /// Fill colour as a CSS colour string.
    pub fill: String,
    /// Fill opacity in `0..=1`.
    pub fill_opacity: f64,
    /// Stroke colour as a CSS colour string.
    pub stroke: String,
    /// Stroke width in content units. `0` disables the stroke.
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL.to_owned(),
            fill_opacity: DEFAULT_FILL_OPACITY,
            stroke: DEFAULT_STROKE.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl Style {
    fn apply(&mut self, patch: &StylePatch) {
        set(&mut self.fill, patch.fill.clone());
        set(&mut self.fill_opacity, patch.fill_opacity);
        set(&mut self.stroke, patch.stroke.clone());
        set(&mut self.stroke_width, patch.stroke_width);
    }
}

/// A shape on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub geometry: Geometry,
    pub style: Style,
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Element-list label, e.g. `rect3`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{}", self.kind().label(), self.id)
    }

    /// Merge a patch into this shape. A geometry patch of another kind, or one
    /// giving a polygon fewer than three sides, is rejected before anything is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::KindMismatch`] when the geometry patch targets a
    /// different kind of shape, [`EngineError::InvalidSides`] for a side count
    /// below the minimum.
    pub fn apply(&mut self, patch: &ShapePatch) -> Result<(), EngineError> {
        if let Some(geometry) = &patch.geometry {
            self.geometry.apply(self.id, geometry)?;
        }
        self.style.apply(&patch.style);
        Ok(())
    }

    /// Editable attributes as `(key, value)` strings: geometry first, then style.
    #[must_use]
    pub fn attribute_entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        let geometry = match &self.geometry {
            Geometry::Rect(a) => serde_json::to_value(a),
            Geometry::Circle(a) => serde_json::to_value(a),
            Geometry::Polygon(a) => serde_json::to_value(a),
        };
        for value in [geometry, serde_json::to_value(&self.style)].into_iter().flatten() {
            if let Value::Object(map) = value {
                entries.extend(map.into_iter().map(|(k, v)| (k, format_value(&v))));
            }
        }
        entries
    }

    /// Copy of this shape with one form attribute replaced.
    ///
    /// Numeric attributes must parse as finite numbers, `sides` as an integer
    /// of at least three; colour attributes are taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownAttribute`] for keys this kind does not
    /// have, [`EngineError::InvalidNumber`] or [`EngineError::InvalidSides`]
    /// when the value does not parse.
    pub fn with_attribute(&self, key: &str, raw: &str) -> Result<Shape, EngineError> {
        let mut next = self.clone();
        let handled = match &mut next.geometry {
            Geometry::Rect(a) => merge_field(a, key, raw)?,
            Geometry::Circle(a) => merge_field(a, key, raw)?,
            Geometry::Polygon(a) => merge_field(a, key, raw)?,
        };
        if handled || merge_field(&mut next.style, key, raw)? {
            return Ok(next);
        }
        Err(EngineError::UnknownAttribute { kind: self.kind(), key: key.to_owned() })
    }
}

/// Render a JSON attribute value the way the form shows it: integral numbers
/// without a trailing `.0`, strings unquoted.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(u), _) => u.to_string(),
            (None, Some(f)) => f.to_string(),
            (None, None) => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Replace `key` in `target` with `raw`, typed after the field's current value.
/// Returns `Ok(false)` when `target` has no such field.
fn merge_field<T>(target: &mut T, key: &str, raw: &str) -> Result<bool, EngineError>
where
    T: Serialize + DeserializeOwned,
{
    let Ok(Value::Object(mut map)) = serde_json::to_value(&*target) else {
        return Ok(false);
    };
    let Some(current) = map.get(key) else {
        return Ok(false);
    };
    let parsed = parse_field(key, current, raw)?;
    map.insert(key.to_owned(), parsed);
    *target = from_map(map, key, raw)?;
    Ok(true)
}

fn parse_field(key: &str, current: &Value, raw: &str) -> Result<Value, EngineError> {
    let trimmed = raw.trim();
    if key == "sides" {
        return match trimmed.parse::<u32>() {
            Ok(n) if n >= MIN_POLYGON_SIDES => Ok(Value::from(n)),
            _ => Err(EngineError::InvalidSides { min: MIN_POLYGON_SIDES, value: raw.to_owned() }),
        };
    }
    match current {
        Value::String(_) => Ok(Value::String(raw.to_owned())),
        _ => {
            let invalid = || EngineError::InvalidNumber { key: key.to_owned(), value: raw.to_owned() };
            let n = trimmed.parse::<f64>().map_err(|_| invalid())?;
            serde_json::Number::from_f64(n).map(Value::Number).ok_or_else(invalid)
        }
    }
}

fn from_map<T: DeserializeOwned>(map: Map<String, Value>, key: &str, raw: &str) -> Result<T, EngineError> {
    serde_json::from_value(Value::Object(map))
        .map_err(|_| EngineError::InvalidNumber { key: key.to_owned(), value: raw.to_owned() })
}

// =============================================================
// Patches
// =============================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub corner_radius: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CirclePatch {
    pub cx: Option<f64>,
    pub cy: Option<f64>,
    pub r: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonPatch {
    pub cx: Option<f64>,
    pub cy: Option<f64>,
    pub r: Option<f64>,
    pub sides: Option<u32>,
}

/// Sparse geometry update; the variant must match the target's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryPatch {
    Rect(RectPatch),
    Circle(CirclePatch),
    Polygon(PolygonPatch),
}

impl GeometryPatch {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect(_) => ShapeKind::Rect,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
}

/// Sparse update for a shape. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapePatch {
    pub geometry: Option<GeometryPatch>,
    pub style: StylePatch,
}

impl From<GeometryPatch> for ShapePatch {
    fn from(geometry: GeometryPatch) -> Self {
        Self { geometry: Some(geometry), style: StylePatch::default() }
    }
}

impl From<RectPatch> for ShapePatch {
    fn from(patch: RectPatch) -> Self {
        GeometryPatch::Rect(patch).into()
    }
}

impl From<CirclePatch> for ShapePatch {
    fn from(patch: CirclePatch) -> Self {
        GeometryPatch::Circle(patch).into()
    }
}

impl From<PolygonPatch> for ShapePatch {
    fn from(patch: PolygonPatch) -> Self {
        GeometryPatch::Polygon(patch).into()
    }
}

impl From<StylePatch> for ShapePatch {
    fn from(style: StylePatch) -> Self {
        Self { geometry: None, style }
    }
}

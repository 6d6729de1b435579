#![allow(clippy::float_cmp)]

use super::*;

fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape {
        id: ShapeId(3),
        geometry: Geometry::Rect(RectAttrs { x, y, width: w, height: h, corner_radius: 0.0 }),
        style: Style::default(),
    }
}

fn circle(cx: f64, cy: f64, r: f64) -> Shape {
    Shape { id: ShapeId(1), geometry: Geometry::Circle(CircleAttrs { cx, cy, r }), style: Style::default() }
}

fn polygon(cx: f64, cy: f64, r: f64, sides: u32) -> Shape {
    Shape { id: ShapeId(0), geometry: Geometry::Polygon(PolygonAttrs { cx, cy, r, sides }), style: Style::default() }
}

fn entry<'a>(entries: &'a [(String, String)], key: &str) -> Option<&'a str> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

// =============================================================
// Ids and kinds
// =============================================================

#[test]
fn shape_id_display() {
    assert_eq!(ShapeId(42).to_string(), "42");
}

#[test]
fn kind_labels() {
    assert_eq!(ShapeKind::Rect.label(), "rect");
    assert_eq!(ShapeKind::Circle.to_string(), "circle");
    assert_eq!(ShapeKind::Polygon.to_string(), "polygon");
}

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ShapeKind::Polygon).unwrap(), "\"polygon\"");
}

#[test]
fn shape_label_joins_kind_and_id() {
    assert_eq!(rect(0.0, 0.0, 1.0, 1.0).label(), "rect3");
    assert_eq!(circle(0.0, 0.0, 1.0).label(), "circle1");
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn constructors_are_zero_sized() {
    let at = Point::new(5.0, 6.0);
    assert_eq!(Geometry::rect_at(at).bounds(), Bounds { x: 5.0, y: 6.0, width: 0.0, height: 0.0 });
    assert_eq!(Geometry::circle_at(at).bounds(), Bounds { x: 5.0, y: 6.0, width: 0.0, height: 0.0 });
    assert_eq!(Geometry::polygon_at(at, 5).kind(), ShapeKind::Polygon);
}

#[test]
fn position_is_top_left_or_center() {
    assert_eq!(rect(10.0, 20.0, 5.0, 5.0).geometry.position(), Point::new(10.0, 20.0));
    assert_eq!(circle(7.0, 8.0, 2.0).geometry.position(), Point::new(7.0, 8.0));
    assert_eq!(polygon(1.0, 2.0, 3.0, 6).geometry.position(), Point::new(1.0, 2.0));
}

#[test]
fn circle_bounds() {
    let b = circle(100.0, 100.0, 50.0).geometry.bounds();
    assert_eq!(b, Bounds { x: 50.0, y: 50.0, width: 100.0, height: 100.0 });
}

#[test]
fn polygon_vertices_close_the_ring() {
    let pts = polygon_vertices(Point::new(0.0, 0.0), 10.0, 5);
    assert_eq!(pts.len(), 6);
    let first = pts[0];
    let last = pts[5];
    assert!((first.x - last.x).abs() < 1e-9);
    assert!((first.y - last.y).abs() < 1e-9);
    for p in &pts {
        assert!((p.distance_to(Point::new(0.0, 0.0)) - 10.0).abs() < 1e-9);
    }
}

#[test]
fn square_polygon_rests_on_flat_edge() {
    // shift = 180/4 + 90 = 135 degrees, so vertices sit on the diagonals.
    let pts = polygon_vertices(Point::new(0.0, 0.0), 2.0_f64.sqrt(), 4);
    assert!((pts[0].x + 1.0).abs() < 1e-9);
    assert!((pts[0].y - 1.0).abs() < 1e-9);
    let b = polygon(0.0, 0.0, 2.0_f64.sqrt(), 4).geometry.bounds();
    assert!((b.x + 1.0).abs() < 1e-9);
    assert!((b.width - 2.0).abs() < 1e-9);
    assert!((b.height - 2.0).abs() < 1e-9);
}

#[test]
fn polygon_vertices_zero_sides_is_empty() {
    assert!(polygon_vertices(Point::new(0.0, 0.0), 1.0, 0).is_empty());
}

#[test]
fn move_patch_targets_position_fields() {
    let mut shape = circle(0.0, 0.0, 4.0);
    let patch = shape.geometry.move_patch(Point::new(9.0, -3.0));
    shape.apply(&patch.into()).unwrap();
    assert_eq!(shape.geometry, Geometry::Circle(CircleAttrs { cx: 9.0, cy: -3.0, r: 4.0 }));

    let mut shape = rect(0.0, 0.0, 4.0, 2.0);
    let patch = shape.geometry.move_patch(Point::new(1.0, 1.0));
    shape.apply(&patch.into()).unwrap();
    assert_eq!(shape.geometry.bounds(), Bounds { x: 1.0, y: 1.0, width: 4.0, height: 2.0 });
}

// =============================================================
// Patches
// =============================================================

#[test]
fn rect_patch_merges_only_present_fields() {
    let mut shape = rect(50.0, 50.0, 0.0, 0.0);
    shape
        .apply(&RectPatch { x: Some(10.0), width: Some(40.0), height: Some(30.0), ..RectPatch::default() }.into())
        .unwrap();
    assert_eq!(shape.geometry.bounds(), Bounds { x: 10.0, y: 50.0, width: 40.0, height: 30.0 });
}

#[test]
fn mismatched_patch_is_rejected_untouched() {
    let mut shape = rect(1.0, 2.0, 3.0, 4.0);
    let before = shape.clone();
    let patch = ShapePatch {
        geometry: Some(GeometryPatch::Circle(CirclePatch { r: Some(9.0), ..CirclePatch::default() })),
        style: StylePatch { fill: Some("#fff".to_owned()), ..StylePatch::default() },
    };
    let err = shape.apply(&patch).unwrap_err();
    assert_eq!(
        err,
        EngineError::KindMismatch { id: ShapeId(3), expected: ShapeKind::Circle, found: ShapeKind::Rect }
    );
    assert_eq!(shape, before);
}

#[test]
fn polygon_patch_below_min_sides_is_rejected_untouched() {
    let mut shape = polygon(100.0, 100.0, 50.0, 6);
    let before = shape.clone();
    let patch = ShapePatch {
        geometry: Some(GeometryPatch::Polygon(PolygonPatch { r: Some(20.0), sides: Some(1), ..PolygonPatch::default() })),
        style: StylePatch { fill: Some("#fff".to_owned()), ..StylePatch::default() },
    };
    let err = shape.apply(&patch).unwrap_err();
    assert_eq!(err, EngineError::InvalidSides { min: MIN_POLYGON_SIDES, value: "1".to_owned() });
    assert_eq!(shape, before);
}

#[test]
fn polygon_patch_accepts_min_sides() {
    let mut shape = polygon(0.0, 0.0, 5.0, 6);
    shape.apply(&PolygonPatch { sides: Some(MIN_POLYGON_SIDES), ..PolygonPatch::default() }.into()).unwrap();
    assert_eq!(shape.geometry, Geometry::Polygon(PolygonAttrs { cx: 0.0, cy: 0.0, r: 5.0, sides: MIN_POLYGON_SIDES }));
}

#[test]
fn style_patch_applies_to_any_kind() {
    let mut shape = polygon(0.0, 0.0, 5.0, 5);
    shape.apply(&StylePatch { stroke_width: Some(0.0), ..StylePatch::default() }.into()).unwrap();
    assert_eq!(shape.style.stroke_width, 0.0);
    assert_eq!(shape.style.fill, "#000000");
}

#[test]
fn default_style() {
    let style = Style::default();
    assert_eq!(style.fill, "#000000");
    assert_eq!(style.fill_opacity, 0.0);
    assert_eq!(style.stroke, "#000000");
    assert_eq!(style.stroke_width, 2.0);
}

// =============================================================
// Attribute form
// =============================================================

#[test]
fn rect_entries_in_declaration_order() {
    let entries = rect(50.0, 50.0, 200.0, 100.0).attribute_entries();
    let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        ["x", "y", "width", "height", "cornerRadius", "fill", "fillOpacity", "stroke", "strokeWidth"]
    );
    assert_eq!(entry(&entries, "width"), Some("200"));
    assert_eq!(entry(&entries, "fill"), Some("#000000"));
}

#[test]
fn polygon_entries_show_integer_sides() {
    let entries = polygon(150.0, 150.0, 30.5, 6).attribute_entries();
    assert_eq!(entry(&entries, "sides"), Some("6"));
    assert_eq!(entry(&entries, "r"), Some("30.5"));
    assert_eq!(entry(&entries, "width"), None);
}

#[test]
fn with_attribute_sets_number() {
    let shape = circle(0.0, 0.0, 1.0).with_attribute("r", " 12.5 ").unwrap();
    assert_eq!(shape.geometry, Geometry::Circle(CircleAttrs { cx: 0.0, cy: 0.0, r: 12.5 }));
}

#[test]
fn with_attribute_sets_style_fields() {
    let shape = rect(0.0, 0.0, 1.0, 1.0)
        .with_attribute("fill", "#abcdef")
        .unwrap()
        .with_attribute("fillOpacity", "0.5")
        .unwrap();
    assert_eq!(shape.style.fill, "#abcdef");
    assert_eq!(shape.style.fill_opacity, 0.5);
}

#[test]
fn with_attribute_rejects_bad_number() {
    let err = circle(0.0, 0.0, 1.0).with_attribute("r", "abc").unwrap_err();
    assert_eq!(err, EngineError::InvalidNumber { key: "r".to_owned(), value: "abc".to_owned() });
    let err = circle(0.0, 0.0, 1.0).with_attribute("cx", "NaN").unwrap_err();
    assert!(matches!(err, EngineError::InvalidNumber { .. }));
}

#[test]
fn with_attribute_rejects_unknown_key() {
    let err = circle(0.0, 0.0, 1.0).with_attribute("width", "10").unwrap_err();
    assert_eq!(err, EngineError::UnknownAttribute { kind: ShapeKind::Circle, key: "width".to_owned() });
}

#[test]
fn with_attribute_validates_sides() {
    let shape = polygon(0.0, 0.0, 1.0, 5).with_attribute("sides", "8").unwrap();
    assert_eq!(shape.geometry, Geometry::Polygon(PolygonAttrs { cx: 0.0, cy: 0.0, r: 1.0, sides: 8 }));
    for bad in ["2", "0", "-4", "3.5", "many"] {
        let err = polygon(0.0, 0.0, 1.0, 5).with_attribute("sides", bad).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSides { min: 3, .. }), "accepted {bad}");
    }
}

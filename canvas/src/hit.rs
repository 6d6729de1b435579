//! Hit-testing content-space points against shapes.
//!
//! Shapes are tested by their filled area only. The list is scanned from
//! index 0, which is the shape drawn on top.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{DocStore, Geometry, ShapeId};
use crate::shape::polygon_vertices;

/// Topmost shape under `pt`, if any.
#[must_use]
pub fn hit_test(pt: Point, doc: &DocStore) -> Option<ShapeId> {
    doc.shapes().iter().find(|s| contains(&s.geometry, pt)).map(|s| s.id)
}

/// Whether `pt` lies inside the geometry. Zero-size shapes contain nothing.
#[must_use]
pub fn contains(geometry: &Geometry, pt: Point) -> bool {
    match geometry {
        Geometry::Rect(a) => {
            a.width > 0.0
                && a.height > 0.0
                && pt.x >= a.x
                && pt.x <= a.x + a.width
                && pt.y >= a.y
                && pt.y <= a.y + a.height
        }
        Geometry::Circle(a) => a.r > 0.0 && pt.distance_to(Point::new(a.cx, a.cy)) <= a.r,
        Geometry::Polygon(a) => {
            a.r > 0.0 && point_in_polygon(pt, &polygon_vertices(Point::new(a.cx, a.cy), a.r, a.sides))
        }
    }
}

/// Even-odd ray casting. `ring` may repeat its first vertex at the end.
fn point_in_polygon(pt: Point, ring: &[Point]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > pt.y) != (b.y > pt.y) && pt.x < (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

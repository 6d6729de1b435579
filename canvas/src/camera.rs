//! Viewport transform between screen pixels and content coordinates.
//!
//! The visible region is a rectangle in content space (`Viewport`). The canvas
//! element has a fixed pixel size, so the zoom level is derived rather than
//! stored: `canvas_width / viewport.width`.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

/// A point in either screen or content space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Visible rectangle in content space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self { min_x, min_y, width, height }
    }

    /// Top-left corner of the visible region.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }
}

/// Pan/zoom state for a fixed-size canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Region currently rendered to the canvas.
    pub view: Viewport,
    initial: Viewport,
    canvas_width: f64,
    canvas_height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl Camera {
    /// Camera showing content `(0, 0)..(width, height)` at 100%.
    #[must_use]
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        let initial = Viewport::new(0.0, 0.0, canvas_width, canvas_height);
        Self { view: initial, initial, canvas_width, canvas_height }
    }

    /// Screen pixels per content unit.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.canvas_width / self.view.width
    }

    /// Canvas size in CSS pixels.
    #[must_use]
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    /// The viewport restored by [`Camera::reset`].
    #[must_use]
    pub fn initial(&self) -> Viewport {
        self.initial
    }

    /// Resize the canvas. The home viewport becomes the new canvas rectangle;
    /// an untouched view follows it, a panned or zoomed view is kept.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        let untouched = self.view == self.initial;
        self.canvas_width = width;
        self.canvas_height = height;
        self.initial = Viewport::new(0.0, 0.0, width, height);
        if untouched {
            self.view = self.initial;
        }
    }

    /// Convert a screen-space point (CSS pixels) to content coordinates.
    #[must_use]
    pub fn screen_to_content(&self, screen: Point) -> Point {
        let zoom = self.zoom();
        Point {
            x: screen.x / zoom + self.view.min_x,
            y: screen.y / zoom + self.view.min_y,
        }
    }

    /// Convert a content-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn content_to_screen(&self, content: Point) -> Point {
        let zoom = self.zoom();
        Point {
            x: (content.x - self.view.min_x) * zoom,
            y: (content.y - self.view.min_y) * zoom,
        }
    }

    /// Convert a screen-space distance (pixels) to content units.
    #[must_use]
    pub fn screen_dist_to_content(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom()
    }

    /// Zoom level that `zoom_at(factor, _)` would produce.
    #[must_use]
    pub fn zoom_after(&self, factor: f64) -> f64 {
        self.canvas_width / (self.view.width * factor)
    }

    /// Scale the viewport by `factor` keeping the content point under `anchor` fixed.
    ///
    /// `factor < 1` zooms in, `factor > 1` zooms out. Non-positive or
    /// non-finite factors are ignored.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor_content = self.screen_to_content(anchor);
        let view = &mut self.view;
        view.min_x += (anchor_content.x - view.min_x) * (1.0 - factor);
        view.min_y += (anchor_content.y - view.min_y) * (1.0 - factor);
        view.width *= factor;
        view.height *= factor;
    }

    /// Drag the content along with the pointer by a screen-pixel delta.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64) {
        let zoom = self.zoom();
        self.view.min_x -= dx / zoom;
        self.view.min_y -= dy / zoom;
    }

    /// Move the view in the direction of a wheel scroll delta.
    pub fn scroll_by_pixels(&mut self, dx: f64, dy: f64) {
        self.pan_by_pixels(-dx, -dy);
    }

    /// Restore the initial viewport.
    pub fn reset(&mut self) {
        self.view = self.initial;
    }

    /// SVG-style `viewBox` string: `"min_x min_y width height"`.
    #[must_use]
    pub fn view_box(&self) -> String {
        let v = self.view;
        format!("{} {} {} {}", v.min_x, v.min_y, v.width, v.height)
    }
}

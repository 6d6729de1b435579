//! Shared numeric constants for the canvas crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Default canvas width in CSS pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Default canvas height in CSS pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Canvas background behind all shapes.
pub const BACKGROUND_FILL: &str = "#FFFFFF";

// ── Zoom ────────────────────────────────────────────────────────

/// Fraction the viewport grows or shrinks per wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

/// Smallest zoom level a wheel step may reach.
pub const MIN_ZOOM: f64 = 0.05;

/// Largest zoom level a wheel step may reach.
pub const MAX_ZOOM: f64 = 20.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Side count for polygons created with the polygon tool.
pub const DEFAULT_POLYGON_SIDES: u32 = 5;

/// Fewest sides a regular polygon may have.
pub const MIN_POLYGON_SIDES: u32 = 3;

pub const DEFAULT_FILL: &str = "#000000";
pub const DEFAULT_FILL_OPACITY: f64 = 0.0;
pub const DEFAULT_STROKE: &str = "#000000";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

// ── Selection marker ────────────────────────────────────────────

/// Marker line width in screen pixels.
pub const MARKER_LINE_PX: f64 = 2.0;

/// Marker dash length in screen pixels.
pub const MARKER_DASH_PX: f64 = 5.0;

/// Dash offset at the start of each marker animation cycle, in screen pixels.
pub const MARKER_DASH_TRAVEL_PX: f64 = 10.0;

/// Duration of one marker animation cycle.
pub const MARKER_CYCLE_MS: f64 = 1000.0;

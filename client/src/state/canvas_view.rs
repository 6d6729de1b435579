//! Canvas viewport telemetry used by non-canvas UI surfaces.
//!
//! ARCHITECTURE
//! ============
//! `CanvasHost` owns the authoritative camera and cursor and publishes
//! snapshots through this struct so the status bar can render without direct
//! canvas coupling.

#[cfg(test)]
#[path = "canvas_view_test.rs"]
mod canvas_view_test;

use canvas::camera::Camera;

/// Live canvas telemetry consumed by chrome (status bar, canvas cursor).
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasViewState {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub cursor: &'static str,
}

impl Default for CanvasViewState {
    fn default() -> Self {
        Self::from_camera(&Camera::default(), "default")
    }
}

impl CanvasViewState {
    #[must_use]
    pub fn from_camera(camera: &Camera, cursor: &'static str) -> Self {
        let origin = camera.view.origin();
        Self { zoom: camera.zoom(), offset_x: origin.x, offset_y: origin.y, cursor }
    }

    /// Status bar zoom readout, e.g. `Zoom: 110%`.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("Zoom: {:.0}%", self.zoom * 100.0)
    }

    /// Status bar offset readout, rounded to whole content units.
    #[must_use]
    pub fn offset_label(&self) -> String {
        format!("X/Y offset: {:.0}, {:.0}", self.offset_x, self.offset_y)
    }
}

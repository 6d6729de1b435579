//! Local UI chrome state (active tool, viewport reset requests).
//!
//! DESIGN
//! ======
//! Keeps presentation concerns out of the scene snapshot so the toolbar and
//! status bar can drive the engine without touching it directly.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state shared through context as `RwSignal<UiState>`.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_tool: ToolType,
    /// Bumped to ask the canvas host to restore the initial pan and zoom.
    pub home_viewport_seq: u64,
}

impl UiState {
    /// Request a viewport reset from the canvas host.
    pub fn request_home_viewport(&mut self) {
        self.home_viewport_seq = self.home_viewport_seq.wrapping_add(1);
    }
}

/// Tools offered by the toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolType {
    #[default]
    Select,
    Rectangle,
    Circle,
    Polygon,
}

impl ToolType {
    /// Toolbar order.
    pub const ALL: [Self; 4] = [Self::Select, Self::Rectangle, Self::Circle, Self::Polygon];

    /// Button caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Polygon => "Polygon",
        }
    }
}

//! Scene snapshot published by the canvas host, plus the queue of panel edits.
//!
//! ARCHITECTURE
//! ============
//! The engine owns the document. After every batch of engine actions the
//! canvas host copies the shape list and selection into `SceneState` so the
//! element list and attribute editor can render reactively. Panels never call
//! the engine: they push [`SceneCommand`]s, which the host drains in order.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use canvas::doc::{Shape, ShapeId};

/// An edit requested by a panel, applied by the canvas host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneCommand {
    Select(ShapeId),
    Delete(ShapeId),
    Reorder { from: usize, to: usize },
    SetAttribute { id: ShapeId, key: String, value: String },
}

/// One row of the element list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeRow {
    pub id: ShapeId,
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// Reactive mirror of the engine's shapes and selection.
#[derive(Clone, Debug, Default)]
pub struct SceneState {
    pub shapes: Vec<Shape>,
    pub selected: Option<ShapeId>,
    /// Last rejected attribute edit, shown under the form.
    pub last_error: Option<String>,
    /// Bumped on every rejected edit so the form rebuilds its inputs.
    pub rejected_edits: u64,
    pending: Vec<SceneCommand>,
}

impl SceneState {
    /// Replace the mirrored document.
    pub fn sync(&mut self, shapes: &[Shape], selected: Option<ShapeId>) {
        self.shapes = shapes.to_vec();
        self.selected = selected;
    }

    /// Queue an edit for the canvas host.
    pub fn push(&mut self, command: SceneCommand) {
        self.pending.push(command);
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take all queued edits in submission order.
    pub fn take_pending(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.pending)
    }

    /// Record an accepted attribute edit.
    pub fn accept_edit(&mut self) {
        self.last_error = None;
    }

    /// Record a rejected attribute edit.
    pub fn reject_edit(&mut self, message: String) {
        self.last_error = Some(message);
        self.rejected_edits += 1;
    }

    /// The selected shape, if it is still in the list.
    #[must_use]
    pub fn selected_shape(&self) -> Option<&Shape> {
        let id = self.selected?;
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Element list rows in list order.
    #[must_use]
    pub fn rows(&self) -> Vec<ShapeRow> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| ShapeRow {
                id: shape.id,
                index,
                label: shape.label(),
                selected: self.selected == Some(shape.id),
            })
            .collect()
    }

    /// Whether the row at `index` can move towards the top of the list.
    #[must_use]
    pub fn can_move_up(&self, index: usize) -> bool {
        index > 0 && index < self.shapes.len()
    }

    /// Whether the row at `index` can move towards the bottom of the list.
    #[must_use]
    pub fn can_move_down(&self, index: usize) -> bool {
        index + 1 < self.shapes.len()
    }
}

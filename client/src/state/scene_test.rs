use super::*;
use canvas::doc::DocStore;

fn demo_scene() -> SceneState {
    let doc = DocStore::demo();
    let mut scene = SceneState::default();
    scene.sync(doc.shapes(), Some(ShapeId(1)));
    scene
}

// =============================================================
// Snapshot
// =============================================================

#[test]
fn default_scene_is_empty() {
    let scene = SceneState::default();
    assert!(scene.shapes.is_empty());
    assert_eq!(scene.selected, None);
    assert!(!scene.has_pending());
}

#[test]
fn rows_follow_list_order_and_mark_selection() {
    let rows = demo_scene().rows();
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["polygon0", "circle1", "rect2"]);
    assert_eq!(rows.iter().filter(|r| r.selected).count(), 1);
    assert!(rows[1].selected);
    assert_eq!(rows[2].index, 2);
}

#[test]
fn selected_shape_resolves_id() {
    let scene = demo_scene();
    assert_eq!(scene.selected_shape().map(|s| s.id), Some(ShapeId(1)));
}

#[test]
fn selected_shape_missing_from_list_is_none() {
    let mut scene = demo_scene();
    scene.selected = Some(ShapeId(99));
    assert!(scene.selected_shape().is_none());
}

#[test]
fn rejected_edit_sets_error_and_bumps_counter() {
    let mut scene = demo_scene();
    scene.reject_edit("bad number".to_owned());
    scene.reject_edit("bad number".to_owned());
    assert_eq!(scene.last_error.as_deref(), Some("bad number"));
    assert_eq!(scene.rejected_edits, 2);
}

#[test]
fn accepted_edit_clears_error_only() {
    let mut scene = demo_scene();
    scene.reject_edit("bad number".to_owned());
    scene.accept_edit();
    assert_eq!(scene.last_error, None);
    assert_eq!(scene.rejected_edits, 1);
}

#[test]
fn move_buttons_disabled_at_ends() {
    let scene = demo_scene();
    assert!(!scene.can_move_up(0));
    assert!(scene.can_move_down(0));
    assert!(scene.can_move_up(2));
    assert!(!scene.can_move_down(2));
    assert!(!scene.can_move_up(3));
}

// =============================================================
// Command queue
// =============================================================

#[test]
fn take_pending_drains_in_order() {
    let mut scene = SceneState::default();
    scene.push(SceneCommand::Select(ShapeId(2)));
    scene.push(SceneCommand::Reorder { from: 0, to: 1 });
    assert!(scene.has_pending());
    let taken = scene.take_pending();
    assert_eq!(taken, vec![SceneCommand::Select(ShapeId(2)), SceneCommand::Reorder { from: 0, to: 1 }]);
    assert!(!scene.has_pending());
    assert!(scene.take_pending().is_empty());
}

#[test]
fn sync_keeps_pending_commands() {
    let mut scene = SceneState::default();
    scene.push(SceneCommand::Delete(ShapeId(0)));
    scene.sync(DocStore::demo().shapes(), None);
    assert!(scene.has_pending());
    assert_eq!(scene.shapes.len(), 3);
}

use super::*;

// =============================================================
// UiState defaults
// =============================================================

#[test]
fn ui_state_default_tool_is_select() {
    let state = UiState::default();
    assert_eq!(state.active_tool, ToolType::Select);
    assert_eq!(state.home_viewport_seq, 0);
}

#[test]
fn request_home_viewport_bumps_seq() {
    let mut state = UiState::default();
    state.request_home_viewport();
    state.request_home_viewport();
    assert_eq!(state.home_viewport_seq, 2);
}

#[test]
fn request_home_viewport_wraps() {
    let mut state = UiState { home_viewport_seq: u64::MAX, ..UiState::default() };
    state.request_home_viewport();
    assert_eq!(state.home_viewport_seq, 0);
}

// =============================================================
// ToolType
// =============================================================

#[test]
fn toolbar_lists_select_first() {
    assert_eq!(ToolType::ALL[0], ToolType::Select);
    assert_eq!(ToolType::ALL.len(), 4);
}

#[test]
fn tool_labels() {
    let labels: Vec<&str> = ToolType::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(labels, vec!["Select", "Rectangle", "Circle", "Polygon"]);
}

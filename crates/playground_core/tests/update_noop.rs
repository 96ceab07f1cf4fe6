use playground_core::{update, AppState, Msg, Region};

#[test]
fn dismissing_without_alert_is_noop() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::AlertDismissed);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn closing_input_before_any_output_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::PanelClosed(Region::Input));

    assert_eq!(state.panels(), next.panels());
    assert!(effects.is_empty());
}

use ytdl_core::{update, AppState, Msg};

#[test]
fn back_on_first_step_is_noop() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::BackClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn dismissing_without_notice_does_not_mark_dirty() {
    let (mut next, effects) = update(AppState::new(), Msg::NoticeDismissed);

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

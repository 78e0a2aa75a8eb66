use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NoticeState::default();
    let a = state.push(Notice::success("Login successful!"));
    let b = state.push(Notice::error("Login failed"));
    assert!(b > a);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[1].1.kind, NoticeKind::Error);
}

#[test]
fn dismiss_removes_only_matching_notice() {
    let mut state = NoticeState::default();
    let a = state.push(Notice::success("one"));
    let b = state.push(Notice::success("two"));
    state.dismiss(a);
    assert_eq!(state.items, vec![(b, Notice::success("two"))]);
    state.dismiss(a);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut state = NoticeState::default();
    let a = state.push(Notice::success("one"));
    state.dismiss(a);
    let b = state.push(Notice::success("two"));
    assert_ne!(a, b);
}

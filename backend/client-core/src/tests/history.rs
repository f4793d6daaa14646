use crate::router::{History, MemoryHistory};

#[test]
fn given_pushed_entries_when_going_back_and_forward_then_paths_follow_stack() {
    let history = MemoryHistory::starting_at("/");
    history.push("/stations");
    history.push("/lines");

    assert_eq!(history.back().as_deref(), Some("/stations"));
    assert_eq!(history.back().as_deref(), Some("/"));
    assert_eq!(history.back(), None);
    assert_eq!(history.forward().as_deref(), Some("/stations"));
    assert_eq!(history.current().as_deref(), Some("/stations"));
}

/// **VALUE**: Verifies pushing after going back drops the forward entries.
///
/// **BUG THIS CATCHES**: Would catch forward navigation landing on a page the
/// user already navigated away from.
#[test]
fn given_back_then_push_when_going_forward_then_old_entries_are_gone() {
    let history = MemoryHistory::starting_at("/");
    history.push("/stations");
    history.push("/lines");
    history.back();

    history.push("/sections");

    assert_eq!(history.len(), 3);
    assert_eq!(history.forward(), None);
    assert_eq!(history.back().as_deref(), Some("/stations"));
}

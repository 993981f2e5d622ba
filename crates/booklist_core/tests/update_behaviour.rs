mod common;

use std::sync::Once;

use booklist_core::{update, AppState, Effect, LoadState, Msg};
use common::{book, react_and_redux};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn mounted(term: &str) -> AppState {
    let (state, effects) = update(AppState::new(term), Msg::Mounted);
    assert_eq!(effects, vec![Effect::StartLoad { generation: 1 }]);
    state
}

fn loaded(term: &str) -> AppState {
    let (state, _) = update(
        mounted(term),
        Msg::BooksLoaded {
            generation: 1,
            books: react_and_redux(),
        },
    );
    state
}

#[test]
fn initial_state_is_not_started_and_empty() {
    init_logging();
    let state = AppState::new("React");
    let view = state.view();

    assert_eq!(state.load_state(), LoadState::NotStarted);
    assert!(!view.loading);
    assert!(!view.error);
    assert!(view.books.is_empty());
    assert_eq!(view.search_term, "React");
}

#[test]
fn mount_enters_loading_with_empty_collection() {
    init_logging();
    let mut state = mounted("");
    let view = state.view();

    assert!(view.loading);
    assert!(!view.error);
    assert_eq!(view.total_count, 0);
    assert!(state.consume_dirty());
}

#[test]
fn successful_load_replaces_collection() {
    init_logging();
    let state = loaded("");
    let view = state.view();

    assert_eq!(state.load_state(), LoadState::Loaded);
    assert!(!view.loading);
    assert!(!view.error);
    assert_eq!(view.total_count, 2);
    assert_eq!(view.books, react_and_redux());
}

#[test]
fn failed_load_sets_error_and_keeps_collection() {
    init_logging();
    let (state, effects) = update(
        mounted(""),
        Msg::LoadFailed {
            generation: 1,
            message: "simulated failure".to_string(),
        },
    );
    let view = state.view();

    assert!(effects.is_empty());
    assert!(!view.loading);
    assert!(view.error);
    assert!(view.books.is_empty());
    assert_eq!(view.error_message.as_deref(), Some("simulated failure"));
}

#[test]
fn search_change_filters_and_persists() {
    init_logging();
    let (state, effects) = update(loaded(""), Msg::SearchChanged("redux".to_string()));
    let view = state.view();

    assert_eq!(effects, vec![Effect::PersistSearchTerm("redux".to_string())]);
    assert_eq!(view.books, vec![react_and_redux()[1].clone()]);
    assert_eq!(view.total_count, 2);
}

#[test]
fn visible_subset_follows_collection_changes() {
    init_logging();
    let state = loaded("re");
    assert_eq!(state.view().books.len(), 2);

    let (state, _) = update(state, Msg::RemoveRequested(book(1, "Redux")));
    let ids: Vec<_> = state.view().books.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![0]);
}

#[test]
fn removal_does_not_survive_a_reload() {
    init_logging();
    let (state, _) = update(loaded(""), Msg::RemoveRequested(book(0, "React")));
    assert_eq!(state.view().total_count, 1);

    let (state, effects) = update(state, Msg::ReloadRequested);
    assert_eq!(effects, vec![Effect::StartLoad { generation: 2 }]);
    // Existing rows stay visible while the reload is outstanding.
    assert_eq!(state.view().total_count, 1);
    assert!(state.view().loading);

    let (state, _) = update(
        state,
        Msg::BooksLoaded {
            generation: 2,
            books: react_and_redux(),
        },
    );
    assert_eq!(state.view().books, react_and_redux());
}

#[test]
fn remove_before_load_resolves_is_superseded() {
    init_logging();
    let (state, _) = update(mounted(""), Msg::RemoveRequested(book(0, "React")));
    let (state, _) = update(
        state,
        Msg::BooksLoaded {
            generation: 1,
            books: react_and_redux(),
        },
    );
    assert_eq!(state.view().total_count, 2);
}

#[test]
fn overlapping_load_requests_are_deduplicated() {
    init_logging();
    let state = mounted("");
    let (state, effects) = update(state, Msg::Mounted);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::ReloadRequested);
    assert!(effects.is_empty());
    assert_eq!(state.pending_generation(), Some(1));
}

#[test]
fn stale_outcomes_are_ignored() {
    init_logging();
    let state = loaded("");
    let (state, _) = update(state, Msg::ReloadRequested);

    let (state, _) = update(
        state,
        Msg::LoadFailed {
            generation: 1,
            message: "late".to_string(),
        },
    );
    assert!(state.view().loading);
    assert!(!state.view().error);

    let (state, _) = update(
        state,
        Msg::BooksLoaded {
            generation: 1,
            books: Vec::new(),
        },
    );
    assert_eq!(state.view().total_count, 2);
    assert_eq!(state.pending_generation(), Some(2));
}

#[test]
fn reload_after_failure_clears_error() {
    init_logging();
    let (state, _) = update(
        mounted(""),
        Msg::LoadFailed {
            generation: 1,
            message: "boom".to_string(),
        },
    );
    let (state, effects) = update(state, Msg::ReloadRequested);
    assert_eq!(effects, vec![Effect::StartLoad { generation: 2 }]);
    let view = state.view();
    assert!(view.loading);
    assert!(!view.error);

    let (state, _) = update(
        state,
        Msg::BooksLoaded {
            generation: 2,
            books: react_and_redux(),
        },
    );
    assert_eq!(state.last_error(), None);
    assert!(!state.view().error);
}

#[test]
fn unmount_cancels_and_discards_late_results() {
    init_logging();
    let (state, effects) = update(mounted(""), Msg::Unmounted);
    assert_eq!(effects, vec![Effect::CancelLoad { generation: 1 }]);
    assert!(state.is_torn_down());

    let (state, effects) = update(
        state,
        Msg::BooksLoaded {
            generation: 1,
            books: react_and_redux(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.books().is_empty());

    let (_state, effects) = update(state, Msg::SearchChanged("x".to_string()));
    assert!(effects.is_empty());
}

#[test]
fn unmount_without_pending_load_has_no_effect() {
    init_logging();
    let (state, effects) = update(loaded(""), Msg::Unmounted);
    assert!(effects.is_empty());
    assert!(state.is_torn_down());
}

#[test]
fn unchanged_search_term_is_not_dirty() {
    init_logging();
    let mut state = loaded("react");
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::SearchChanged("react".to_string()));
    assert_eq!(effects.len(), 1);
    assert!(!state.consume_dirty());
}

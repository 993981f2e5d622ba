use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{AppState, CollectionAction, Effect, LoadState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_torn_down() {
        engine_debug!("Dropping {:?} after teardown", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted | Msg::ReloadRequested => {
            // Overlapping loads are deduplicated: the in-flight attempt wins.
            if state.load_state() == LoadState::Loading {
                return (state, Vec::new());
            }
            let generation = state.begin_load();
            engine_info!("Starting load generation={}", generation);
            vec![Effect::StartLoad { generation }]
        }
        Msg::SearchChanged(term) => {
            state.set_search_term(term.clone());
            vec![Effect::PersistSearchTerm(term)]
        }
        Msg::RemoveRequested(book) => {
            state.apply(CollectionAction::RemoveById(book));
            Vec::new()
        }
        Msg::BooksLoaded { generation, books } => {
            if state.is_current(generation) {
                engine_info!(
                    "Load generation={} resolved with {} books",
                    generation,
                    books.len()
                );
                state.finish_load(books);
            } else {
                engine_debug!("Ignoring stale load generation={}", generation);
            }
            Vec::new()
        }
        Msg::LoadFailed {
            generation,
            message,
        } => {
            if state.is_current(generation) {
                engine_warn!("Load generation={} failed: {}", generation, message);
                state.fail_load(message);
            } else {
                engine_debug!("Ignoring stale failure for generation={}", generation);
            }
            Vec::new()
        }
        Msg::Unmounted => match state.tear_down() {
            Some(generation) => vec![Effect::CancelLoad { generation }],
            None => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

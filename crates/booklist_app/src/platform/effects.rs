use std::sync::Arc;

use booklist_core::{Book, Effect, KeyValueStore, Msg, PersistedValue};
use booklist_engine::{
    BookSource, FixtureSource, HttpBookSource, LoaderEvent, LoaderHandle, RemoteBook,
    SourceSettings,
};
use engine_logging::{engine_debug, engine_info, engine_warn};

use super::config::SourceConfig;

/// Executes core effects against the loader and the persisted search term.
pub struct EffectRunner<S> {
    loader: LoaderHandle,
    search: PersistedValue<S>,
}

impl<S: KeyValueStore> EffectRunner<S> {
    pub fn new(loader: LoaderHandle, search: PersistedValue<S>) -> Self {
        Self { loader, search }
    }

    pub fn search_term(&self) -> &str {
        self.search.value()
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PersistSearchTerm(term) => {
                    engine_debug!("PersistSearchTerm term_len={}", term.len());
                    self.search.set(term);
                }
                Effect::StartLoad { generation } => {
                    engine_info!("StartLoad generation={}", generation);
                    self.loader.start(generation);
                }
                Effect::CancelLoad { generation } => {
                    self.loader.cancel(generation);
                }
            }
        }
    }

    /// Turns finished loads into messages for the core.
    pub fn drain_events(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.loader.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

pub fn build_source(config: &SourceConfig) -> Arc<dyn BookSource> {
    match config {
        SourceConfig::Fixture { delay, outcome } => Arc::new(FixtureSource::new(*delay, *outcome)),
        SourceConfig::Http(endpoint) => Arc::new(HttpBookSource::new(SourceSettings {
            endpoint: endpoint.clone(),
            ..SourceSettings::default()
        })),
    }
}

fn map_event(event: LoaderEvent) -> Msg {
    match event {
        LoaderEvent::Completed {
            generation,
            result: Ok(books),
        } => Msg::BooksLoaded {
            generation,
            books: books.into_iter().map(map_book).collect(),
        },
        LoaderEvent::Completed {
            generation,
            result: Err(err),
        } => {
            engine_warn!("Load generation={} failed: {}", generation, err);
            Msg::LoadFailed {
                generation,
                message: err.to_string(),
            }
        }
    }
}

fn map_book(book: RemoteBook) -> Book {
    Book {
        id: book.id,
        title: book.title,
        author: book.author,
        url: book.url,
        num_comments: book.num_comments,
        points: book.points,
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use booklist_core::{update, AppState, MemoryStore, SEARCH_TERM_KEY};
    use booklist_engine::{FixtureOutcome, LoadError};

    use super::*;

    fn runner(outcome: FixtureOutcome) -> EffectRunner<MemoryStore> {
        let source = Arc::new(FixtureSource::new(Duration::from_millis(20), outcome));
        EffectRunner::new(
            LoaderHandle::new(source),
            PersistedValue::new(MemoryStore::new(), SEARCH_TERM_KEY, ""),
        )
    }

    fn wait_for_msgs(runner: &EffectRunner<MemoryStore>) -> Vec<Msg> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let msgs = runner.drain_events();
            if !msgs.is_empty() || Instant::now() > deadline {
                return msgs;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn persist_effect_writes_search_term() {
        let mut runner = runner(FixtureOutcome::Succeed);
        runner.enqueue(vec![Effect::PersistSearchTerm("redux".to_string())]);
        assert_eq!(runner.search_term(), "redux");
        assert_eq!(runner.search.store().entry(SEARCH_TERM_KEY), Some("redux"));
    }

    #[test]
    fn load_round_trip_through_core() {
        let mut runner = runner(FixtureOutcome::Succeed);
        let (state, effects) = update(AppState::new(""), Msg::Mounted);
        assert!(state.view().loading);
        assert!(state.books().is_empty());
        runner.enqueue(effects);

        let mut state = state;
        for msg in wait_for_msgs(&runner) {
            let (next, effects) = update(state, msg);
            runner.enqueue(effects);
            state = next;
        }

        let view = state.view();
        assert!(!view.loading);
        assert!(!view.error);
        assert_eq!(view.total_count, 2);
        assert_eq!(view.books[0].author, "Jordan Walke");
    }

    #[test]
    fn failed_load_maps_to_error_message() {
        let mut runner = runner(FixtureOutcome::Fail);
        runner.enqueue(vec![Effect::StartLoad { generation: 4 }]);

        assert_eq!(
            wait_for_msgs(&runner),
            vec![Msg::LoadFailed {
                generation: 4,
                message: LoadError::Simulated.to_string(),
            }]
        );
    }
}

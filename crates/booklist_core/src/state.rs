use crate::view_model::AppViewModel;
use crate::{filter_books, reduce, Book, Collection, CollectionAction};

/// Identifies one load attempt; outcomes for any other attempt are stale.
pub type LoadGeneration = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    search_term: String,
    books: Collection,
    load: LoadState,
    generation: LoadGeneration,
    last_error: Option<String>,
    torn_down: bool,
    dirty: bool,
}

impl AppState {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..Self::default()
        }
    }

    /// Derives the view model. The visible subset is recomputed on every call.
    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            search_term: self.search_term.clone(),
            books: filter_books(&self.books, &self.search_term),
            total_count: self.books.len(),
            loading: self.load == LoadState::Loading,
            error: self.load == LoadState::Failed,
            error_message: self.last_error.clone(),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Generation of the load in flight, if any.
    pub fn pending_generation(&self) -> Option<LoadGeneration> {
        (self.load == LoadState::Loading).then_some(self.generation)
    }

    /// Returns whether a re-render is needed and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_search_term(&mut self, term: String) {
        if self.search_term != term {
            self.search_term = term;
            self.dirty = true;
        }
    }

    pub(crate) fn apply(&mut self, action: CollectionAction) {
        let books = std::mem::take(&mut self.books);
        self.books = reduce(books, action);
        self.dirty = true;
    }

    pub(crate) fn begin_load(&mut self) -> LoadGeneration {
        self.generation += 1;
        self.load = LoadState::Loading;
        self.last_error = None;
        self.dirty = true;
        self.generation
    }

    pub(crate) fn is_current(&self, generation: LoadGeneration) -> bool {
        !self.torn_down && self.pending_generation() == Some(generation)
    }

    pub(crate) fn finish_load(&mut self, books: Collection) {
        self.apply(CollectionAction::ReplaceAll(books));
        self.load = LoadState::Loaded;
    }

    pub(crate) fn fail_load(&mut self, message: String) {
        self.load = LoadState::Failed;
        self.last_error = Some(message);
        self.dirty = true;
    }

    pub(crate) fn tear_down(&mut self) -> Option<LoadGeneration> {
        let pending = self.pending_generation();
        self.torn_down = true;
        pending
    }
}

//! Booklist core: pure state machine, reducer, filter and view-model helpers.
mod book;
mod effect;
mod filter;
mod msg;
mod reducer;
mod state;
mod store;
mod update;
mod view_model;

pub use book::{Book, BookId, Collection};
pub use effect::Effect;
pub use filter::filter_books;
pub use msg::Msg;
pub use reducer::{reduce, CollectionAction};
pub use state::{AppState, LoadGeneration, LoadState};
pub use store::{
    KeyValueStore, MemoryStore, PersistedValue, StoreError, DEFAULT_SEARCH_TERM, SEARCH_TERM_KEY,
};
pub use update::update;
pub use view_model::AppViewModel;

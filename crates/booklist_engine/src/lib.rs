//! Booklist engine: async book loading and on-disk persistence helpers.
mod engine;
mod persist;
mod source;
mod types;

pub use engine::LoaderHandle;
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use source::{
    fixture_books, BookSource, FixtureOutcome, FixtureSource, HttpBookSource, SourceSettings,
    DEFAULT_LOAD_DELAY,
};
pub use types::{LoadError, LoadGeneration, LoaderEvent, RemoteBook};

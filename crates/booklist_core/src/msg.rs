use crate::{Book, Collection, LoadGeneration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view came up; kick off the initial load.
    Mounted,
    /// User asked to fetch the collection again.
    ReloadRequested,
    /// User edited the search input.
    SearchChanged(String),
    /// User removed a row.
    RemoveRequested(Book),
    /// Loader resolved.
    BooksLoaded {
        generation: LoadGeneration,
        books: Collection,
    },
    /// Loader rejected.
    LoadFailed {
        generation: LoadGeneration,
        message: String,
    },
    /// The view is going away; outstanding loads must not land.
    Unmounted,
    /// Fallback for placeholder wiring.
    NoOp,
}

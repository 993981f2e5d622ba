use crate::Book;

/// Visible subset of `books` for `term`, in collection order.
///
/// A book is kept when its lower-cased title contains the lower-cased term.
/// No trimming is applied, so an empty term keeps every book.
pub fn filter_books(books: &[Book], term: &str) -> Vec<Book> {
    let needle = term.to_lowercase();
    books
        .iter()
        .filter(|book| book.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

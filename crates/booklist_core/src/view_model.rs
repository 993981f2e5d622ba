use crate::Book;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub search_term: String,
    /// Books matching the search term, in collection order.
    pub books: Vec<Book>,
    pub total_count: usize,
    pub loading: bool,
    pub error: bool,
    pub error_message: Option<String>,
}

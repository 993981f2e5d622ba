pub type BookId = u64;

/// A single list entry. Replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub num_comments: u32,
    pub points: u32,
}

/// Ordered books as displayed. Ids are expected to be unique.
pub type Collection = Vec<Book>;

use crate::{Book, Collection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionAction {
    /// Discard the current collection and take the payload as-is.
    ReplaceAll(Collection),
    /// Drop every book sharing the target's id.
    RemoveById(Book),
}

/// Pure reducer over the book collection.
pub fn reduce(state: Collection, action: CollectionAction) -> Collection {
    match action {
        CollectionAction::ReplaceAll(payload) => payload,
        CollectionAction::RemoveById(target) => state
            .into_iter()
            .filter(|book| book.id != target.id)
            .collect(),
    }
}

use std::collections::HashMap;

use engine_logging::{engine_debug, engine_warn};
use thiserror::Error;

/// Key under which the search term is persisted.
pub const SEARCH_TERM_KEY: &str = "search";

/// Search term used when nothing has been persisted yet.
pub const DEFAULT_SEARCH_TERM: &str = "React";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("durable store unavailable: {0}")]
    Unavailable(String),
    #[error("durable store corrupt: {0}")]
    Corrupt(String),
}

/// Durable key/value boundary consumed by [`PersistedValue`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every read and write fail, as if the backing storage were gone.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Raw entry lookup that ignores the unavailable switch.
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A single string value mirrored into a [`KeyValueStore`].
///
/// Durability is best-effort: a failing store degrades this to an in-memory value.
#[derive(Debug)]
pub struct PersistedValue<S> {
    store: S,
    key: String,
    value: String,
}

impl<S: KeyValueStore> PersistedValue<S> {
    /// Reads `key` from `store`, falling back to `initial` when absent or unreadable.
    pub fn new(store: S, key: impl Into<String>, initial: impl Into<String>) -> Self {
        let key = key.into();
        let value = match store.get(&key) {
            Ok(Some(stored)) => {
                engine_debug!("Restored persisted value for key={}", key);
                stored
            }
            Ok(None) => initial.into(),
            Err(err) => {
                engine_warn!("Falling back to initial value for key={}: {}", key, err);
                initial.into()
            }
        };
        Self { store, key, value }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Updates the in-memory value and writes it through to the store.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if let Err(err) = self.store.set(&self.key, &self.value) {
            engine_warn!("Could not persist key={}: {}", self.key, err);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use booklist_core::{KeyValueStore, StoreError};
use booklist_engine::AtomicFileWriter;
use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".booklist_state.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    entries: BTreeMap<String, String>,
}

/// Durable key/value store kept in a RON file inside the state directory.
///
/// The file is re-read on every `get` so edits from another process are seen,
/// and rewritten atomically on every `set`.
pub(crate) struct FileStore {
    writer: AtomicFileWriter,
}

impl FileStore {
    pub(crate) fn new(state_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(state_dir),
        }
    }

    fn path(&self) -> PathBuf {
        self.writer.dir().join(STATE_FILENAME)
    }

    fn load(&self) -> Result<PersistedState, StoreError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PersistedState::default());
            }
            Err(err) => {
                return Err(StoreError::Unavailable(format!("{}: {}", path.display(), err)));
            }
        };

        ron::from_str(&content)
            .map_err(|err| StoreError::Corrupt(format!("{}: {}", path.display(), err)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let state = self.load()?;
        Ok(state.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut state = self.load().unwrap_or_else(|err| {
            engine_warn!("Discarding unreadable state file: {}", err);
            PersistedState::default()
        });
        state.entries.insert(key.to_string(), value.to_string());

        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&state, pretty)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;

        let target = self
            .writer
            .write(STATE_FILENAME, &content)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        engine_info!("Persisted key={} to {:?}", key, target);
        Ok(())
    }
}

pub(crate) fn describe(state_dir: &Path) -> String {
    state_dir.join(STATE_FILENAME).display().to_string()
}

//! Extraction history persistence.

use std::path::Path;

use crate::config::{HISTORY_CAP, HISTORY_FILE};
use crate::error_handling::StorageError;
use crate::extractor::models::HistoryRecord;
use crate::storage::JsonFile;

/// Append-only (prepend, really) history of extraction sessions, capped at the
/// [`HISTORY_CAP`] most recent records, most-recent-first on disk.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    file: JsonFile<Vec<HistoryRecord>>,
}

impl HistoryStore {
    /// A store backed by the given file.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// The default store under `data_dir`.
    pub fn open_in(data_dir: &Path) -> Self {
        Self::new(data_dir.join(HISTORY_FILE))
    }

    /// Prepends `record`, truncates to the cap, and rewrites the file.
    pub fn save(&self, record: HistoryRecord) -> Result<(), StorageError> {
        let mut history = self.file.load()?;
        history.insert(0, record);
        history.truncate(HISTORY_CAP);
        self.file.save(&history)
    }

    /// Returns history, most-recent-first. `limit == 0` means all records;
    /// otherwise at most `limit`.
    pub fn history(&self, limit: usize) -> Result<Vec<HistoryRecord>, StorageError> {
        let mut history = self.file.load()?;
        if limit > 0 && history.len() > limit {
            history.truncate(limit);
        }
        Ok(history)
    }

    /// Removes the history file entirely.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.file.remove()
    }
}

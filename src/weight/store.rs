//! Weight record persistence.

use std::path::Path;

use crate::config::WEIGHT_FILE;
use crate::error_handling::StorageError;
use crate::storage::JsonFile;
use crate::weight::models::WeightRecord;

/// JSON-file store for the full, most-recent-first record list.
#[derive(Debug, Clone)]
pub struct WeightStore {
    file: JsonFile<Vec<WeightRecord>>,
}

impl WeightStore {
    /// A store backed by the given file.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// The default store under `data_dir`.
    pub fn open_in(data_dir: &Path) -> Self {
        Self::new(data_dir.join(WEIGHT_FILE))
    }

    /// Loads all records; a missing or empty file is an empty list.
    pub fn load(&self) -> Result<Vec<WeightRecord>, StorageError> {
        self.file.load()
    }

    /// Rewrites the whole list.
    pub fn save(&self, records: &Vec<WeightRecord>) -> Result<(), StorageError> {
        self.file.save(records)
    }
}

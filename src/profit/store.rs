//! Profit book persistence.

use std::path::Path;

use crate::config::PROFIT_FILE;
use crate::error_handling::StorageError;
use crate::profit::models::ProfitBook;
use crate::storage::JsonFile;

/// JSON-file store for the whole profit book.
#[derive(Debug, Clone)]
pub struct ProfitStore {
    file: JsonFile<ProfitBook>,
}

impl ProfitStore {
    /// A store backed by the given file.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// The default store under `data_dir`.
    pub fn open_in(data_dir: &Path) -> Self {
        Self::new(data_dir.join(PROFIT_FILE))
    }

    /// Loads the book; a missing or empty file is an empty book, and `null`
    /// collections deserialize as empty via the field defaults.
    pub fn load(&self) -> Result<ProfitBook, StorageError> {
        self.file.load()
    }

    /// Rewrites the whole book.
    pub fn save(&self, book: &ProfitBook) -> Result<(), StorageError> {
        self.file.save(book)
    }
}

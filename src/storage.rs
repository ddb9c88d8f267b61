//! Shared JSON file persistence.
//!
//! Every store in the toolbox is a whole-file rewrite of one pretty-printed
//! JSON document. A missing or empty file reads as the default value, not an
//! error. Writes are read-modify-write without file locking; the stores assume
//! a single caller.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error_handling::StorageError;

/// One JSON document on disk, typed by its content.
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    path: PathBuf,
    _content: PhantomData<T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Creates a handle for the document at `path`. Nothing is touched on disk
    /// until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _content: PhantomData,
        }
    }

    /// The file backing this document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing or empty file yields `T::default()`.
    pub fn load(&self) -> Result<T, StorageError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };

        if data.is_empty() {
            return Ok(T::default());
        }

        Ok(serde_json::from_slice(&data)?)
    }

    /// Rewrites the whole document, pretty-printed.
    pub fn save(&self, value: &T) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(value)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    /// Deletes the document. Removing an absent file is not an error.
    pub fn remove(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file: JsonFile<Vec<String>> = JsonFile::new(dir.path().join("absent.json"));

        assert_eq!(file.load().expect("load"), Vec::<String>::new());
    }

    #[test]
    fn empty_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.json");
        std::fs::write(&path, b"").expect("write");

        let file: JsonFile<Vec<String>> = JsonFile::new(path);
        assert_eq!(file.load().expect("load"), Vec::<String>::new());
    }

    #[test]
    fn save_is_pretty_printed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pretty.json");

        let file: JsonFile<Vec<String>> = JsonFile::new(&path);
        file.save(&vec!["a".to_string(), "b".to_string()])
            .expect("save");

        let text = std::fs::read_to_string(&path).expect("read");
        // serde_json pretty printing: one element per line, 2-space indent
        assert!(text.contains("[\n  \"a\",\n  \"b\"\n]"));
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, b"{not json").expect("write");

        let file: JsonFile<Vec<String>> = JsonFile::new(path);
        assert!(matches!(file.load(), Err(StorageError::Parse(_))));
    }

    #[test]
    fn remove_missing_file_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file: JsonFile<Vec<String>> = JsonFile::new(dir.path().join("absent.json"));

        assert!(file.remove().is_ok());
    }
}

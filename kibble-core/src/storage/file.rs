//! File-backed blob storage, one JSON file per key.

use std::fs;
use std::io;
use std::path::PathBuf;

use super::{BlobKey, BlobStore};
use crate::error::StorageError;

/// Stores each blob as `<data_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    data_dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: BlobKey) -> PathBuf {
        self.data_dir.join(key.filename())
    }

    pub fn exists(&self, key: BlobKey) -> bool {
        self.path(key).exists()
    }
}

impl BlobStore for FileBlobStore {
    /// Returns `Ok(None)` if the file doesn't exist.
    fn read(&self, key: BlobKey) -> Result<Option<String>, StorageError> {
        let path = self.path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    /// Creates the data directory if it doesn't exist.
    fn write(&self, key: BlobKey, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StorageError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let path = self.path(key);
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }
}

//! In-memory blob storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BlobKey, BlobStore};
use crate::error::StorageError;

#[derive(Debug, Default)]
struct Inner {
    blobs: HashMap<BlobKey, String>,
    fail_writes: bool,
}

/// A cloneable handle to a shared in-memory map.
///
/// Clones observe each other's writes, so a store can be dropped and a new
/// one loaded against the same key space.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail until turned off again.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_writes = fail;
        }
    }

    /// Places a raw blob, bypassing any encoding.
    pub fn insert_raw(&self, key: BlobKey, value: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.blobs.insert(key, value.into());
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: BlobKey) -> Result<Option<String>, StorageError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(inner.blobs.get(&key).cloned())
    }

    fn write(&self, key: BlobKey, value: &str) -> Result<(), StorageError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        if inner.fail_writes {
            return Err(StorageError::Unavailable(format!(
                "writes to {} are disabled",
                key.name()
            )));
        }
        inner.blobs.insert(key, value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_blobs() {
        let a = MemoryBlobStore::new();
        let b = a.clone();

        a.write(BlobKey::Cats, "[]").unwrap();
        assert_eq!(b.read(BlobKey::Cats).unwrap().as_deref(), Some("[]"));
        assert!(b.read(BlobKey::Meals).unwrap().is_none());
    }

    #[test]
    fn test_fail_writes() {
        let store = MemoryBlobStore::new();
        store.set_fail_writes(true);
        assert!(store.write(BlobKey::Meals, "[]").is_err());

        store.set_fail_writes(false);
        assert!(store.write(BlobKey::Meals, "[]").is_ok());
    }
}

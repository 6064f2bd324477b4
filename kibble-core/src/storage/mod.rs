//! Key-value blob persistence.
//!
//! The core serializes each collection to a JSON string and hands it to a
//! [`BlobStore`]. Backends only move strings; decoding and validation stay in
//! the core so that every backend gets the same fail-open behaviour.

mod blob_key;
mod codec;
mod file;
mod memory;

pub use blob_key::BlobKey;
pub use codec::{decode_records, decode_value, encode};
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use crate::error::StorageError;

pub trait BlobStore {
    /// Returns `Ok(None)` when nothing has been written under `key`.
    fn read(&self, key: BlobKey) -> Result<Option<String>, StorageError>;

    fn write(&self, key: BlobKey, value: &str) -> Result<(), StorageError>;
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn read(&self, key: BlobKey) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: BlobKey, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

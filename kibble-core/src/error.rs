//! Error types shared across the core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::CatId;

/// A mutation was rejected before anything changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a cat name")]
    EmptyCatName,

    #[error("Please select a cat")]
    NoCatSelected,

    #[error("Cat not found: {0}")]
    UnknownCat(CatId),

    #[error("Please enter meal amount")]
    EmptyAmount,

    #[error("Preset cannot be empty")]
    EmptyPreset,

    #[error("Preset already exists: {0}")]
    DuplicatePreset(String),

    #[error("Language cannot be empty")]
    EmptyLanguage,
}

/// Failure reading from or writing to a blob store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid meal type '{0}'. Valid options: wet, dry, treats")]
pub struct ParseMealTypeError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::EmptyCatName.to_string(),
            "Please enter a cat name"
        );
        assert_eq!(
            ValidationError::DuplicatePreset("1 cup".into()).to_string(),
            "Preset already exists: 1 cup"
        );
    }

    #[test]
    fn test_storage_error_keeps_source() {
        use std::error::Error as _;

        let err = StorageError::Io {
            path: PathBuf::from("/tmp/cats.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/cats.json"));
        assert!(err.source().is_some());
    }
}

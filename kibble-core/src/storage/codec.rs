//! JSON encoding of persisted collections.
//!
//! Decoding never fails: malformed blobs and records are logged and dropped.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::BlobKey;
use crate::error::StorageError;

pub fn encode<T: Serialize + ?Sized>(key: BlobKey, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.name(),
        source,
    })
}

/// Decodes a record array, keeping each record that parses and passes `keep`.
///
/// Returns `None` when the blob itself is not a JSON array.
pub fn decode_records<T, F>(key: BlobKey, raw: &str, keep: F) -> Option<Vec<T>>
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool,
{
    let items: Vec<Value> = match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Discarding malformed {} blob: {}", key.name(), e);
            return None;
        }
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(record) if keep(&record) => Some(record),
            Ok(_) => {
                tracing::warn!("Discarding invalid {} record at index {}", key.name(), index);
                None
            }
            Err(e) => {
                tracing::warn!(
                    "Discarding unreadable {} record at index {}: {}",
                    key.name(),
                    index,
                    e
                );
                None
            }
        })
        .collect();

    tracing::debug!("Loaded {}/{} {} record(s)", records.len(), total, key.name());
    Some(records)
}

/// Decodes a single value. Returns `None` when it does not parse.
pub fn decode_value<T: DeserializeOwned>(key: BlobKey, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding malformed {} blob: {}", key.name(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_records_skips_bad_items() {
        let raw = r#"["1 cup", 7, "", "1 can"]"#;
        let records: Vec<String> =
            decode_records(BlobKey::Presets, raw, |s: &String| !s.is_empty()).unwrap();
        assert_eq!(records, vec!["1 cup".to_string(), "1 can".to_string()]);
    }

    #[test]
    fn test_decode_records_rejects_non_array() {
        let records: Option<Vec<String>> =
            decode_records(BlobKey::Presets, "{not json", |_: &String| true);
        assert!(records.is_none());

        let records: Option<Vec<String>> =
            decode_records(BlobKey::Presets, r#"{"a": 1}"#, |_: &String| true);
        assert!(records.is_none());
    }

    #[test]
    fn test_decode_value() {
        assert_eq!(decode_value::<bool>(BlobKey::Settings, "true"), Some(true));
        assert_eq!(decode_value::<bool>(BlobKey::Settings, "nope"), None);
    }

    #[test]
    fn test_encode() {
        let raw = encode(BlobKey::Presets, &vec!["1 cup"]).unwrap();
        assert_eq!(raw, r#"["1 cup"]"#);
    }
}

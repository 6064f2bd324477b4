//! Saved amount shortcuts offered when logging a meal.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Seeded on first run, when nothing has been persisted yet.
pub const DEFAULT_PRESETS: [&str; 5] = ["1/4 cup", "1/2 cup", "1 cup", "1 can", "2 tablespoons"];

/// Ordered list of amount presets. Insertion order is display order.
///
/// Duplicates are detected by exact, case-sensitive comparison of the text
/// as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Presets {
    items: Vec<String>,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            items: DEFAULT_PRESETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Presets {
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn from_items(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, text: &str) -> bool {
        self.items.iter().any(|item| item == text)
    }

    pub fn add(&mut self, text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyPreset);
        }
        if self.contains(text) {
            return Err(ValidationError::DuplicatePreset(text.to_string()));
        }
        self.items.push(text.to_string());
        Ok(())
    }

    /// Returns whether a preset was removed.
    pub fn remove(&mut self, text: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != text);
        self.items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_presets_verbatim() {
        let presets = Presets::default();
        assert_eq!(
            presets.items(),
            &["1/4 cup", "1/2 cup", "1 cup", "1 can", "2 tablespoons"]
        );
    }

    #[test]
    fn test_add_appends() {
        let mut presets = Presets::default();
        presets.add("10g").unwrap();
        assert_eq!(presets.items().last().map(String::as_str), Some("10g"));
        assert_eq!(presets.items().len(), 6);
    }

    #[test]
    fn test_add_blank_rejected() {
        let mut presets = Presets::empty();
        assert_eq!(presets.add(""), Err(ValidationError::EmptyPreset));
        assert_eq!(presets.add("   "), Err(ValidationError::EmptyPreset));
        assert!(presets.items().is_empty());
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut presets = Presets::default();
        let before = presets.clone();

        assert_eq!(
            presets.add("1 cup"),
            Err(ValidationError::DuplicatePreset("1 cup".into()))
        );
        assert_eq!(presets, before);
    }

    #[test]
    fn test_duplicate_check_is_exact() {
        let mut presets = Presets::default();
        presets.add("1 CUP").unwrap();
        presets.add(" 1 cup").unwrap();
        assert_eq!(presets.items().len(), 7);
    }

    #[test]
    fn test_remove() {
        let mut presets = Presets::default();
        assert!(presets.remove("1 can"));
        assert!(!presets.contains("1 can"));
        assert!(!presets.remove("1 can"));
        assert_eq!(presets.items().len(), 4);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let presets = Presets::from_items(vec!["a".into(), "b".into()]);
        assert_eq!(serde_json::to_string(&presets).unwrap(), r#"["a","b"]"#);
    }
}

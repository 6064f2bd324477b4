use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Per-user display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dark_mode: bool,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            language: "en".to_string(),
        }
    }
}

impl Settings {
    /// Flips dark mode and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), ValidationError> {
        let language = language.trim();
        if language.is_empty() {
            return Err(ValidationError::EmptyLanguage);
        }
        self.language = language.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.dark_mode);
        assert_eq!(settings.language, "en");
    }

    #[test]
    fn test_toggle_dark_mode() {
        let mut settings = Settings::default();
        assert!(settings.toggle_dark_mode());
        assert!(!settings.toggle_dark_mode());
    }

    #[test]
    fn test_set_language() {
        let mut settings = Settings::default();
        settings.set_language(" fr ").unwrap();
        assert_eq!(settings.language, "fr");

        assert_eq!(settings.set_language(""), Err(ValidationError::EmptyLanguage));
        assert_eq!(settings.language, "fr");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"darkMode": true}"#).unwrap();
        assert!(settings.dark_mode);
        assert_eq!(settings.language, "en");
    }
}

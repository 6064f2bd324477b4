//! Logical keys of the blob store.

/// Each collection is persisted as one blob under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKey {
    Cats,
    Meals,
    Presets,
    Settings,
    Session,
}

impl BlobKey {
    pub fn name(&self) -> &'static str {
        match self {
            BlobKey::Cats => "cats",
            BlobKey::Meals => "meals",
            BlobKey::Presets => "presets",
            BlobKey::Settings => "settings",
            BlobKey::Session => "session",
        }
    }

    /// Returns the filename used by file-backed storage.
    pub fn filename(&self) -> String {
        format!("{}.json", self.name())
    }
}

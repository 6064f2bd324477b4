use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a cat.
pub type CatId = Uuid;

/// A cat that meals are logged against. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    pub id: CatId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Cat {
    /// Creates a cat with a fresh id. The name is stored trimmed.
    pub fn new(name: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            created_at,
        }
    }

    /// A persisted record is only accepted when its name is non-blank.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl fmt::Display for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

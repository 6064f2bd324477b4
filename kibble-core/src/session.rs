//! Per-session state: the active cat and the meal entry draft.
//!
//! The session holds the active cat by id only and resolves it against the
//! store on every read, so a cat deleted elsewhere simply reads as no
//! selection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{Cat, CatId, Meal, MealType};
use crate::storage::BlobStore;
use crate::store::{NewMeal, Store};

/// Field values of the meal entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealDraft {
    default_type: MealType,
    pub meal_type: MealType,
    pub amount: String,
    pub notes: String,
    /// `None` means "now" at the moment of submission.
    pub occurred_at: Option<DateTime<Utc>>,
}

impl Default for MealDraft {
    fn default() -> Self {
        Self::new(MealType::default())
    }
}

impl MealDraft {
    pub fn new(default_type: MealType) -> Self {
        Self {
            default_type,
            meal_type: default_type,
            amount: String::new(),
            notes: String::new(),
            occurred_at: None,
        }
    }

    pub fn default_type(&self) -> MealType {
        self.default_type
    }

    pub fn apply_preset(&mut self, preset: &str) {
        self.amount = preset.to_string();
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.default_type);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    active_cat_id: Option<CatId>,
    #[serde(skip)]
    pub draft: MealDraft,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose draft resets to `default_type`.
    pub fn with_default_meal_type(mut self, default_type: MealType) -> Self {
        self.draft = MealDraft::new(default_type);
        self
    }

    /// Selecting the active cat again clears the selection; selecting any
    /// other cat replaces it. Returns whether `cat` is active afterwards.
    pub fn select(&mut self, cat: &Cat) -> bool {
        if self.active_cat_id == Some(cat.id) {
            self.active_cat_id = None;
            false
        } else {
            self.active_cat_id = Some(cat.id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.active_cat_id = None;
    }

    pub fn active_id(&self) -> Option<CatId> {
        self.active_cat_id
    }

    pub fn active<'a, S: BlobStore>(&self, store: &'a Store<S>) -> Option<&'a Cat> {
        self.active_cat_id.and_then(|id| store.cat(id))
    }

    /// Logs the draft against the active cat. The draft is reset only when
    /// the meal was accepted.
    pub fn submit_meal<S: BlobStore>(
        &mut self,
        store: &mut Store<S>,
    ) -> Result<Meal, ValidationError> {
        let cat_id = self
            .active(store)
            .map(|cat| cat.id)
            .ok_or(ValidationError::NoCatSelected)?;

        let meal = store.add_meal(NewMeal {
            cat_id: Some(cat_id),
            meal_type: Some(self.draft.meal_type),
            amount: self.draft.amount.clone(),
            notes: self.draft.notes.clone(),
            occurred_at: self.draft.occurred_at,
        })?;

        self.draft.reset();
        Ok(meal)
    }
}

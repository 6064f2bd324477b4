//! The authoritative in-memory collections and their persistence boundary.
//!
//! Every mutation writes the affected blob straight away. A failed write is
//! logged and otherwise ignored: the in-memory state stays as mutated and the
//! next successful write brings the blob back in line.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{StorageError, ValidationError};
use crate::models::{Cat, CatId, Meal, MealId, MealType};
use crate::presets::Presets;
use crate::query::MealQuery;
use crate::session::Session;
use crate::settings::Settings;
use crate::storage::{decode_records, decode_value, encode, BlobKey, BlobStore};

/// Input for [`Store::add_meal`].
#[derive(Debug, Clone, Default)]
pub struct NewMeal {
    pub cat_id: Option<CatId>,
    /// Defaults to wet food.
    pub meal_type: Option<MealType>,
    pub amount: String,
    pub notes: String,
    /// Defaults to the clock's current time.
    pub occurred_at: Option<DateTime<Utc>>,
}

pub struct Store<S: BlobStore> {
    storage: S,
    clock: Box<dyn Clock>,
    cats: Vec<Cat>,
    meals: Vec<Meal>,
    presets: Presets,
    settings: Settings,
}

impl<S: BlobStore> Store<S> {
    /// Opens a store on the system clock and loads whatever is persisted.
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: S, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            storage,
            clock,
            cats: Vec::new(),
            meals: Vec::new(),
            presets: Presets::default(),
            settings: Settings::default(),
        };
        store.load_all();
        store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn cats(&self) -> &[Cat] {
        &self.cats
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Replaces every in-memory collection with what the blob store holds.
    ///
    /// Missing or unreadable blobs yield empty collections (presets fall
    /// back to the default set); individual invalid records are dropped.
    pub fn load_all(&mut self) -> (&[Cat], &[Meal]) {
        self.cats = self
            .read_blob(BlobKey::Cats)
            .and_then(|raw| decode_records(BlobKey::Cats, &raw, Cat::is_valid))
            .map(dedup_by_id(|cat: &Cat| cat.id))
            .unwrap_or_default();

        self.meals = self
            .read_blob(BlobKey::Meals)
            .and_then(|raw| decode_records(BlobKey::Meals, &raw, Meal::is_valid))
            .map(dedup_by_id(|meal: &Meal| meal.id))
            .unwrap_or_default();

        self.presets = self
            .read_blob(BlobKey::Presets)
            .and_then(|raw| {
                decode_records(BlobKey::Presets, &raw, |text: &String| {
                    !text.trim().is_empty()
                })
            })
            .map(|mut items| {
                let mut seen = std::collections::HashSet::new();
                items.retain(|item| seen.insert(item.clone()));
                Presets::from_items(items)
            })
            .unwrap_or_default();

        self.settings = self
            .read_blob(BlobKey::Settings)
            .and_then(|raw| decode_value(BlobKey::Settings, &raw))
            .unwrap_or_default();

        tracing::debug!(
            "Loaded {} cat(s), {} meal(s), {} preset(s)",
            self.cats.len(),
            self.meals.len(),
            self.presets.items().len()
        );

        (&self.cats, &self.meals)
    }

    /// Writes every collection. All keys are attempted; the first failure
    /// is returned.
    pub fn persist(&self) -> Result<(), StorageError> {
        let mut first_error = None;
        for key in [
            BlobKey::Cats,
            BlobKey::Meals,
            BlobKey::Presets,
            BlobKey::Settings,
        ] {
            if let Err(e) = self.write_blob(key) {
                tracing::warn!("Failed to persist {}: {}", key.name(), e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn read_blob(&self, key: BlobKey) -> Option<String> {
        match self.storage.read(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key.name(), e);
                None
            }
        }
    }

    fn write_blob(&self, key: BlobKey) -> Result<(), StorageError> {
        let raw = match key {
            BlobKey::Cats => encode(key, &self.cats)?,
            BlobKey::Meals => encode(key, &self.meals)?,
            BlobKey::Presets => encode(key, &self.presets)?,
            BlobKey::Settings => encode(key, &self.settings)?,
            BlobKey::Session => return Ok(()),
        };
        self.storage.write(key, &raw)?;
        tracing::debug!("Wrote {} ({} bytes)", key.name(), raw.len());
        Ok(())
    }

    /// Write-behind after a mutation: failures are logged, never surfaced.
    fn write_after_mutation(&self, key: BlobKey) {
        if let Err(e) = self.write_blob(key) {
            tracing::warn!("Failed to persist {}: {}", key.name(), e);
        }
    }

    // ------------------------------------------------------------------
    // Cats
    // ------------------------------------------------------------------

    pub fn cat(&self, id: CatId) -> Option<&Cat> {
        self.cats.iter().find(|cat| cat.id == id)
    }

    /// Resolves a cat by id, then exact name, then case-insensitive name.
    pub fn find_cat(&self, reference: &str) -> Option<&Cat> {
        let reference = reference.trim();
        if let Ok(id) = Uuid::parse_str(reference) {
            if let Some(cat) = self.cat(id) {
                return Some(cat);
            }
        }
        self.cats
            .iter()
            .find(|cat| cat.name == reference)
            .or_else(|| {
                let lowered = reference.to_lowercase();
                self.cats
                    .iter()
                    .find(|cat| cat.name.to_lowercase() == lowered)
            })
    }

    pub fn add_cat(&mut self, name: &str) -> Result<Cat, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyCatName);
        }

        let mut cat = Cat::new(name, self.clock.now());
        while self.cat(cat.id).is_some() {
            cat.id = Uuid::new_v4();
        }

        self.cats.push(cat.clone());
        tracing::info!("Added cat {} ({})", cat.name, cat.id);
        self.write_after_mutation(BlobKey::Cats);
        Ok(cat)
    }

    /// Removes a cat together with every meal logged against it.
    ///
    /// Returns the removed cat and the number of meals removed with it, or
    /// `None` when no cat has that id.
    pub fn delete_cat(&mut self, id: CatId) -> Option<(Cat, usize)> {
        let index = self.cats.iter().position(|cat| cat.id == id)?;
        let cat = self.cats.remove(index);

        let before = self.meals.len();
        self.meals.retain(|meal| meal.cat_id != id);
        let removed_meals = before - self.meals.len();

        tracing::info!(
            "Deleted cat {} ({}) and {} meal(s)",
            cat.name,
            cat.id,
            removed_meals
        );
        self.write_after_mutation(BlobKey::Cats);
        if removed_meals > 0 {
            self.write_after_mutation(BlobKey::Meals);
        }
        Some((cat, removed_meals))
    }

    // ------------------------------------------------------------------
    // Meals
    // ------------------------------------------------------------------

    pub fn meal(&self, id: MealId) -> Option<&Meal> {
        self.meals.iter().find(|meal| meal.id == id)
    }

    pub fn add_meal(&mut self, new_meal: NewMeal) -> Result<Meal, ValidationError> {
        let cat_id = new_meal.cat_id.ok_or(ValidationError::NoCatSelected)?;
        if self.cat(cat_id).is_none() {
            return Err(ValidationError::UnknownCat(cat_id));
        }
        if new_meal.amount.trim().is_empty() {
            return Err(ValidationError::EmptyAmount);
        }

        let occurred_at = new_meal.occurred_at.unwrap_or_else(|| self.clock.now());
        let mut meal = Meal::new(
            cat_id,
            new_meal.meal_type.unwrap_or_default(),
            new_meal.amount.trim(),
            occurred_at,
        )
        .with_notes(new_meal.notes);
        while self.meal(meal.id).is_some() {
            meal.id = Uuid::new_v4();
        }

        self.meals.push(meal.clone());
        tracing::info!("Logged {} meal {} for cat {}", meal.meal_type, meal.id, cat_id);
        self.write_after_mutation(BlobKey::Meals);
        Ok(meal)
    }

    /// Removes a meal. Unknown ids are a no-op and return `None`.
    pub fn delete_meal(&mut self, id: MealId) -> Option<Meal> {
        let index = self.meals.iter().position(|meal| meal.id == id)?;
        let meal = self.meals.remove(index);
        tracing::info!("Deleted meal {}", meal.id);
        self.write_after_mutation(BlobKey::Meals);
        Some(meal)
    }

    /// Read-side views for whichever cat the session has selected.
    pub fn query(&self, session: &Session) -> MealQuery<'_> {
        let active = session.active(self).map(|cat| cat.id);
        MealQuery::new(&self.meals, active, self.clock.now())
    }

    // ------------------------------------------------------------------
    // Presets and settings
    // ------------------------------------------------------------------

    pub fn add_preset(&mut self, text: &str) -> Result<(), ValidationError> {
        self.presets.add(text)?;
        self.write_after_mutation(BlobKey::Presets);
        Ok(())
    }

    /// Returns whether the preset existed.
    pub fn remove_preset(&mut self, text: &str) -> bool {
        let removed = self.presets.remove(text);
        if removed {
            self.write_after_mutation(BlobKey::Presets);
        }
        removed
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        let dark_mode = self.settings.toggle_dark_mode();
        self.write_after_mutation(BlobKey::Settings);
        dark_mode
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), ValidationError> {
        self.settings.set_language(language)?;
        self.write_after_mutation(BlobKey::Settings);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Restores the persisted selection. A missing or unreadable blob gives
    /// an empty session.
    pub fn load_session(&self) -> Session {
        self.read_blob(BlobKey::Session)
            .and_then(|raw| decode_value(BlobKey::Session, &raw))
            .unwrap_or_default()
    }

    pub fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        let raw = encode(BlobKey::Session, session)?;
        self.storage.write(BlobKey::Session, &raw)
    }
}

/// Keeps the first record for each id.
fn dedup_by_id<T, F>(id_of: F) -> impl Fn(Vec<T>) -> Vec<T>
where
    F: Fn(&T) -> Uuid,
{
    move |mut records: Vec<T>| {
        let mut seen = std::collections::HashSet::new();
        records.retain(|record| seen.insert(id_of(record)));
        records
    }
}

//! Kibble Core Library
//!
//! Cats, their meals, and the statistics derived from them, persisted as
//! JSON blobs in a pluggable key-value store.

pub mod clock;
pub mod error;
pub mod models;
pub mod presets;
pub mod query;
pub mod session;
pub mod settings;
pub mod storage;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ParseMealTypeError, StorageError, ValidationError};
pub use models::{Cat, CatId, Meal, MealId, MealType};
pub use presets::{Presets, DEFAULT_PRESETS};
pub use query::{MealQuery, Statistics};
pub use session::{MealDraft, Session};
pub use settings::Settings;
pub use storage::{BlobKey, BlobStore, FileBlobStore, MemoryBlobStore};
pub use store::{NewMeal, Store};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

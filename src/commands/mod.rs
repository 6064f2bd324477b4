mod cat;
mod config_cmd;
mod meal;
mod preset;
mod settings_cmd;

pub use cat::CatCommand;
pub use config_cmd::ConfigCommand;
pub use meal::MealCommand;
pub use preset::PresetCommand;
pub use settings_cmd::SettingsCommand;

use clap::ValueEnum;
use kibble_core::{Cat, FileBlobStore, Session, Store};

pub type AppStore = Store<FileBlobStore>;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Looks a cat up by id or name, failing with a readable message.
fn find_cat(store: &AppStore, reference: &str) -> Result<Cat, Box<dyn std::error::Error>> {
    store
        .find_cat(reference)
        .cloned()
        .ok_or_else(|| format!("Cat not found: {}", reference).into())
}

/// Returns the session to run a meal command in: the persisted one, or a
/// throwaway one with `cat` selected when `--cat` was given.
fn scoped_session(
    store: &AppStore,
    session: &Session,
    cat: Option<&str>,
) -> Result<Session, Box<dyn std::error::Error>> {
    match cat {
        Some(reference) => {
            let cat = find_cat(store, reference)?;
            let mut scoped = Session::new().with_default_meal_type(session.draft.default_type());
            scoped.select(&cat);
            Ok(scoped)
        }
        None => Ok(session.clone()),
    }
}

/// Session writes follow the store's policy: logged, never fatal.
fn save_session(store: &AppStore, session: &Session) {
    if let Err(e) = store.save_session(session) {
        tracing::warn!("Failed to save session: {}", e);
    }
}

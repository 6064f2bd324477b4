use clap::{Args, Subcommand};
use kibble_core::Session;

use super::{find_cat, save_session, AppStore, OutputFormat};
use crate::prompt::confirmer;

#[derive(Args)]
pub struct CatCommand {
    #[command(subcommand)]
    pub command: CatSubcommand,
}

#[derive(Subcommand)]
pub enum CatSubcommand {
    /// Register a new cat
    Add {
        /// Cat name
        name: String,
    },

    /// List cats (the active cat is marked with *)
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Select a cat for meal commands; selecting the active cat again clears it
    Select {
        /// Cat name or ID
        cat: String,
    },

    /// Delete a cat together with its meal history
    Delete {
        /// Cat name or ID
        cat: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

impl CatCommand {
    pub fn run(
        &self,
        store: &mut AppStore,
        session: &mut Session,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CatSubcommand::Add { name } => {
                let cat = store.add_cat(name)?;
                println!("Added cat: {}", cat);
            }
            CatSubcommand::List { format } => match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(store.cats())?);
                }
                OutputFormat::Text => {
                    if store.cats().is_empty() {
                        println!("No cats yet. Add one with 'kibble cat add <name>'.");
                        return Ok(());
                    }
                    let active = session.active(store).map(|cat| cat.id);
                    for cat in store.cats() {
                        let marker = if Some(cat.id) == active { "*" } else { " " };
                        println!("{} {}", marker, cat);
                    }
                }
            },
            CatSubcommand::Select { cat } => {
                let cat = find_cat(store, cat)?;
                if session.select(&cat) {
                    println!("Selected {}", cat.name);
                } else {
                    println!("Deselected {}", cat.name);
                }
                save_session(store, session);
            }
            CatSubcommand::Delete { cat, yes } => {
                let cat = find_cat(store, cat)?;
                let meal_count = store.meals().iter().filter(|m| m.cat_id == cat.id).count();

                let message = format!(
                    "Delete {} and {} logged meal(s)? This cannot be undone.",
                    cat.name, meal_count
                );
                if !confirmer(*yes).confirm(&message)? {
                    println!("Cancelled");
                    return Ok(());
                }

                if let Some((removed, meals)) = store.delete_cat(cat.id) {
                    println!("Deleted {} ({} meal(s) removed)", removed.name, meals);
                }
                if session.active_id() == Some(cat.id) {
                    session.clear();
                    save_session(store, session);
                }
            }
        }
        Ok(())
    }
}

use clap::{Args, Subcommand};

use super::{AppStore, OutputFormat};
use crate::prompt::confirmer;

#[derive(Args)]
pub struct PresetCommand {
    #[command(subcommand)]
    pub command: PresetSubcommand,
}

#[derive(Subcommand)]
pub enum PresetSubcommand {
    /// List amount presets in display order
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Save a new amount preset
    Add {
        /// Preset text, e.g. "1/3 cup"
        text: String,
    },

    /// Remove an amount preset
    Remove {
        /// Preset text, matched exactly
        text: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

impl PresetCommand {
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            PresetSubcommand::List { format } => match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(store.presets())?);
                }
                OutputFormat::Text => {
                    if store.presets().items().is_empty() {
                        println!("No presets saved");
                    }
                    for preset in store.presets().items() {
                        println!("  {}", preset);
                    }
                }
            },
            PresetSubcommand::Add { text } => {
                store.add_preset(text)?;
                println!("Added preset: {}", text);
            }
            PresetSubcommand::Remove { text, yes } => {
                if !store.presets().contains(text) {
                    println!("Preset not found: {}", text);
                    return Ok(());
                }

                let message = format!("Remove preset '{}'?", text);
                if !confirmer(*yes).confirm(&message)? {
                    println!("Cancelled");
                    return Ok(());
                }

                store.remove_preset(text);
                println!("Removed preset: {}", text);
            }
        }
        Ok(())
    }
}

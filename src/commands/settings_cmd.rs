use clap::{Args, Subcommand};

use super::{AppStore, OutputFormat};

#[derive(Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show user settings
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Toggle dark mode
    DarkMode,

    /// Set the display language
    Language {
        /// Language code, e.g. "en"
        language: String,
    },
}

impl SettingsCommand {
    pub fn run(&self, store: &mut AppStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SettingsSubcommand::Show { format } => match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(store.settings())?);
                }
                OutputFormat::Text => {
                    let settings = store.settings();
                    println!("Dark mode: {}", on_off(settings.dark_mode));
                    println!("Language:  {}", settings.language);
                }
            },
            SettingsSubcommand::DarkMode => {
                let dark_mode = store.toggle_dark_mode();
                println!("Dark mode: {}", on_off(dark_mode));
            }
            SettingsSubcommand::Language { language } => {
                store.set_language(language)?;
                println!("Language: {}", store.settings().language);
            }
        }
        Ok(())
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

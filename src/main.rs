use clap::{Parser, Subcommand};
use kibble_core::{FileBlobStore, Session, Store};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod prompt;

use commands::{AppStore, CatCommand, ConfigCommand, MealCommand, PresetCommand, SettingsCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "kibble")]
#[command(version)]
#[command(about = "Track what your cats eat", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage cats and the active selection
    Cat(CatCommand),

    /// Log, list and analyze meals
    Meal(MealCommand),

    /// Manage amount presets
    Preset(PresetCommand),

    /// Manage user settings
    Settings(SettingsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;
    init_tracing(&config);

    match cli.command {
        Some(Commands::Cat(cmd)) => {
            let (mut store, mut session) = open_store(&config);
            cmd.run(&mut store, &mut session)
        }
        Some(Commands::Meal(cmd)) => {
            let (mut store, session) = open_store(&config);
            cmd.run(&mut store, &session)
        }
        Some(Commands::Preset(cmd)) => {
            let (mut store, _) = open_store(&config);
            cmd.run(&mut store)
        }
        Some(Commands::Settings(cmd)) => {
            let (mut store, _) = open_store(&config);
            cmd.run(&mut store)
        }
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}

/// Loads persisted data. Unreadable blobs degrade to empty collections.
fn open_store(config: &Config) -> (AppStore, Session) {
    tracing::debug!("Data directory: {}", config.data_dir.value.display());
    let store = Store::open(FileBlobStore::new(config.data_dir.value.clone()));
    let session = store
        .load_session()
        .with_default_meal_type(config.default_meal_type.value);
    (store, session)
}

/// Logs go to stderr so command output on stdout stays parseable.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level.value))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

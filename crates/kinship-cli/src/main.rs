//! Kinship CLI - Command-line interface for the family relationship store.

use clap::Parser;
use kinship_cli::commands;
use kinship_cli::{Cli, Command, Config, Formatter};
use kinship_inference::InferenceEngine;
use kinship_store::SqliteStore;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> kinship_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config, cli.verbose);

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    let engine = InferenceEngine::new(config.inference.clone())?;

    let db_path = config.database_path(cli.database.as_deref())?;
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut store = SqliteStore::new(&db_path)?;
    tracing::debug!(database = %db_path.display(), "store opened");

    match cli.command {
        Command::Member(args) => commands::execute_member(args, &mut store, &formatter)?,
        Command::Family(args) => commands::execute_family(args, &mut store, &engine, &formatter)?,
    }

    Ok(())
}

fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.settings.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

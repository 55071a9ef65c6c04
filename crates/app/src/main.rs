//! Rollcall - operator command line
//!
//! Opens the configured database, runs one command and prints its result as
//! JSON on stdout.

use std::path::PathBuf;

use clap::Parser;
use rollcall_core::config::{default_config_path, Config};
use rollcall_core::{Database, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(&config, &cli.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config, command: &Command) -> Result<()> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(path = %path.display(), "Opening database");
    let db = Database::open(&path)?;

    let output = commands::run(&db, command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// `--config` / `ROLLCALL_CONFIG`, else the platform config file, else defaults
fn load_config(explicit: Option<PathBuf>) -> Result<Config> {
    match explicit.or_else(default_config_path) {
        Some(path) => Config::load(&path),
        None => Ok(Config::default()),
    }
}

//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(about = "Rollcall event attendance operator CLI")]
pub struct Cli {
    /// Config file (default: rollcall.toml in the platform config directory)
    #[arg(long, global = true, env = "ROLLCALL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create or upgrade the database schema
    Migrate,
    /// List every event with its room and corporation
    Events,
    /// List the attendance lists of an event
    Lists {
        /// Event id
        event_id: Uuid,
    },
    /// Report members missing a presence row
    Audit,
}

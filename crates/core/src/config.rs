//! Runtime configuration
//!
//! Loaded from a TOML file. Every section and key is optional.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the config file looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "rollcall.toml";

/// Name of the database file in the platform data directory
pub const DATABASE_FILE_NAME: &str = "rollcall.db";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file; the platform data directory when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Configured database path, else `rollcall.db` in the data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DATABASE_FILE_NAME)),
        }
    }
}

/// `rollcall.toml` in the platform config directory, if one exists
pub fn default_config_path() -> Option<PathBuf> {
    let path = project_dirs().ok()?.config_dir().join(CONFIG_FILE_NAME);
    path.exists().then_some(path)
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "rollcall", "rollcall").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })
}

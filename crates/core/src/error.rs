//! Error types for Rollcall Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid time range: end time precedes start time")]
    InvalidTimeRange,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Event password is already in use")]
    PasswordConflict,

    #[error("Room belongs to a different corporation")]
    CrossCorporationRoom,

    #[error("User already belongs to this event")]
    AlreadyMember,

    #[error("No members found for this event")]
    NoMembersFound,

    #[error("No attendance lists found for this event")]
    NoListsFound,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True when a statement hit a UNIQUE or PRIMARY KEY constraint
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Error::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Database value parsing utilities
//!
//! Provides error-safe parsing of stored values.

use chrono::{DateTime, Utc};
use rusqlite::Error as SqlError;
use uuid::Uuid;

use crate::models::{PresenceMark, UserRole};

/// Parse a UUID from a database string column
pub fn parse_uuid(s: &str) -> Result<Uuid, SqlError> {
    Uuid::parse_str(s).map_err(|e| {
        SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a DateTime from an RFC3339 string
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, SqlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Convert a u8 to UserRole
pub fn role_from_u8(value: u8) -> UserRole {
    match value {
        3 => UserRole::PlatformAdmin,
        2 => UserRole::CorporationOwner,
        _ => UserRole::Member,
    }
}

/// Presence marks are stored as a nullable integer
pub fn mark_to_sql(mark: PresenceMark) -> Option<i32> {
    match mark {
        PresenceMark::Unmarked => None,
        PresenceMark::Present => Some(1),
        PresenceMark::Absent => Some(0),
    }
}

pub fn mark_from_sql(value: Option<i32>) -> PresenceMark {
    match value {
        None => PresenceMark::Unmarked,
        Some(0) => PresenceMark::Absent,
        Some(_) => PresenceMark::Present,
    }
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

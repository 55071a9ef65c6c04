//! Database migration system
//!
//! Tracks schema versions and applies migrations in order.

use rusqlite::Connection;
use tracing::{info, instrument};

use crate::error::Result;

/// A database migration
pub struct Migration {
    /// Version number (must be sequential starting from 1)
    pub version: u32,
    /// Description of what this migration does
    pub description: &'static str,
    /// SQL to run for this migration
    pub sql: &'static str,
}

/// All migrations in order
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema",
        sql: r#"
            -- Users table
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                role INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );

            -- Corporations table
            CREATE TABLE IF NOT EXISTS corporations (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL
            );

            -- Rooms table
            CREATE TABLE IF NOT EXISTS rooms (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                corporation_id TEXT NOT NULL,
                FOREIGN KEY (corporation_id) REFERENCES corporations(id)
            );

            -- Corporations owned by each user
            CREATE TABLE IF NOT EXISTS corporation_owners (
                user_id TEXT NOT NULL,
                corporation_id TEXT NOT NULL,
                PRIMARY KEY (user_id, corporation_id),
                FOREIGN KEY (user_id) REFERENCES users(id),
                FOREIGN KEY (corporation_id) REFERENCES corporations(id)
            );

            -- Events table
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                administrator_id TEXT NOT NULL,
                password TEXT NOT NULL UNIQUE,
                room_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (administrator_id) REFERENCES users(id),
                FOREIGN KEY (room_id) REFERENCES rooms(id),
                UNIQUE(name, room_id)
            );

            -- Event membership (the primary key guards duplicate joins)
            CREATE TABLE IF NOT EXISTS events_users (
                event_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                joined_at TEXT NOT NULL,
                PRIMARY KEY (event_id, user_id),
                FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE,
                FOREIGN KEY (user_id) REFERENCES users(id)
            );

            -- Attendance lists table
            CREATE TABLE IF NOT EXISTS attendance_lists (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL,
                name TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE
            );

            -- Presences table (NULL mark = not recorded yet)
            CREATE TABLE IF NOT EXISTS presences (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                attendance_list_id TEXT NOT NULL,
                mark INTEGER,
                FOREIGN KEY (user_id) REFERENCES users(id),
                FOREIGN KEY (attendance_list_id) REFERENCES attendance_lists(id) ON DELETE CASCADE,
                UNIQUE(user_id, attendance_list_id)
            );
        "#,
    },
    Migration {
        version: 2,
        description: "Add indexes for query performance",
        sql: r#"
            -- Lookup indexes
            CREATE INDEX IF NOT EXISTS idx_rooms_corporation ON rooms(corporation_id);
            CREATE INDEX IF NOT EXISTS idx_events_administrator ON events(administrator_id);
            CREATE INDEX IF NOT EXISTS idx_events_room ON events(room_id);

            -- Membership indexes
            CREATE INDEX IF NOT EXISTS idx_events_users_user ON events_users(user_id);

            -- Attendance indexes
            CREATE INDEX IF NOT EXISTS idx_attendance_lists_event ON attendance_lists(event_id);
            CREATE INDEX IF NOT EXISTS idx_presences_list ON presences(attendance_list_id);
        "#,
    },
];

/// Initialize the migrations table
fn init_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version
fn get_current_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })?;
    Ok(version.unwrap_or(0))
}

/// Record that a migration was applied
fn record_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            migration.version,
            migration.description,
            chrono::Utc::now().to_rfc3339()
        ],
    )?;
    Ok(())
}

/// Run all pending migrations
///
/// Each migration and its bookkeeping row commit together, so a failed
/// migration leaves the schema at the previous version.
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    init_migrations_table(conn)?;

    let current_version = get_current_version(conn)?;
    info!(current_version, "Checking for pending migrations");

    for migration in MIGRATIONS.iter().filter(|m| m.version > current_version) {
        info!(
            version = migration.version,
            description = migration.description,
            "Applying migration"
        );

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)?;
        record_migration(&tx, migration)?;
        tx.commit()?;
    }

    let new_version = get_current_version(conn)?;
    if new_version > current_version {
        info!(
            from = current_version,
            to = new_version,
            "Database schema updated"
        );
    }

    Ok(())
}

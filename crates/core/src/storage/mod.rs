//! SQLite storage layer for Rollcall

mod attendance;
mod directory;
mod events;
mod migrations;
mod parse;
mod presences;
mod traits;
mod users;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    AttendanceList, Corporation, Event, EventSummary, MemberInfo, Membership, Presence,
    PresenceMark, Room, User, UserRole,
};

pub use attendance::AttendanceStore;
pub use directory::DirectoryStore;
pub use events::EventStore;
pub use presences::PresenceStore;
pub use traits::{
    AttendanceRepository, DirectoryRepository, EventRepository, MembershipRepository,
    PresenceRepository, Storage, Transactional, UserRepository,
};
pub use users::UserStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<u32> {
        let version: Option<u32> =
            self.conn
                .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                    row.get(0)
                })?;
        Ok(version.unwrap_or(0))
    }

    pub fn users(&self) -> UserStore<'_> {
        UserStore::new(&self.conn)
    }

    pub fn directory(&self) -> DirectoryStore<'_> {
        DirectoryStore::new(&self.conn)
    }

    pub fn events(&self) -> EventStore<'_> {
        EventStore::new(&self.conn)
    }

    pub fn attendance(&self) -> AttendanceStore<'_> {
        AttendanceStore::new(&self.conn)
    }

    pub fn presences(&self) -> PresenceStore<'_> {
        PresenceStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl UserRepository for Database {
    fn create_user(&self, user: &User) -> Result<()> {
        self.users().create(user)
    }

    fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.users().find_by_id(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users().find_by_email(email)
    }

    fn update_user_role(&self, user_id: Uuid, role: UserRole) -> Result<()> {
        self.users().update_role(user_id, role)
    }

    fn grant_corporation(&self, user_id: Uuid, corporation_id: Uuid) -> Result<()> {
        self.users().grant_corporation(user_id, corporation_id)
    }
}

impl DirectoryRepository for Database {
    fn create_corporation(&self, corporation: &Corporation) -> Result<()> {
        self.directory().create_corporation(corporation)
    }

    fn create_room(&self, room: &Room) -> Result<()> {
        self.directory().create_room(room)
    }

    fn find_corporation_by_id(&self, id: Uuid) -> Result<Option<Corporation>> {
        self.directory().find_corporation_by_id(id)
    }

    fn find_room_by_id(&self, id: Uuid) -> Result<Option<Room>> {
        self.directory().find_room_by_id(id)
    }
}

impl EventRepository for Database {
    fn create_event(&self, event: &Event) -> Result<()> {
        self.events().create(event)
    }

    fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        self.events().find_by_id(id)
    }

    fn find_event_by_name_and_room(&self, name: &str, room_id: Uuid) -> Result<Option<Event>> {
        self.events().find_by_name_and_room(name, room_id)
    }

    fn find_event_by_password(&self, password: &str) -> Result<Option<Event>> {
        self.events().find_by_password(password)
    }

    fn password_in_use(&self, password: &str, excluding: Option<Uuid>) -> Result<bool> {
        self.events().password_in_use(password, excluding)
    }

    fn update_event(&self, event: &Event) -> Result<()> {
        self.events().update(event)
    }

    fn list_event_summaries(&self) -> Result<Vec<EventSummary>> {
        self.events().list_summaries()
    }

    fn list_events_administered_by(&self, user_id: Uuid) -> Result<Vec<EventSummary>> {
        self.events().list_administered_by(user_id)
    }

    fn list_events_for_member(&self, user_id: Uuid) -> Result<Vec<EventSummary>> {
        self.events().list_for_member(user_id)
    }

    fn list_events_for_corporation(&self, corporation_id: Uuid) -> Result<Vec<Event>> {
        self.events().list_for_corporation(corporation_id)
    }
}

impl MembershipRepository for Database {
    fn add_member(&self, membership: &Membership) -> Result<()> {
        self.events().add_member(membership)
    }

    fn is_member(&self, user_id: Uuid, event_id: Uuid) -> Result<bool> {
        self.events().is_member(user_id, event_id)
    }

    fn list_member_ids(&self, event_id: Uuid) -> Result<Vec<Uuid>> {
        self.events().member_ids(event_id)
    }

    fn list_members(&self, event_id: Uuid) -> Result<Vec<MemberInfo>> {
        self.events().list_members(event_id)
    }
}

impl AttendanceRepository for Database {
    fn create_attendance_list(&self, list: &AttendanceList) -> Result<()> {
        self.attendance().create(list)
    }

    fn find_attendance_list_by_id(&self, id: Uuid) -> Result<Option<AttendanceList>> {
        self.attendance().find_by_id(id)
    }

    fn list_attendance_lists_for_event(&self, event_id: Uuid) -> Result<Vec<AttendanceList>> {
        self.attendance().list_for_event(event_id)
    }

    fn list_attendance_lists_for_user(&self, user_id: Uuid) -> Result<Vec<AttendanceList>> {
        self.attendance().list_for_user(user_id)
    }
}

impl PresenceRepository for Database {
    fn insert_presences(&self, presences: &[Presence]) -> Result<usize> {
        self.presences().insert_batch(presences)
    }

    fn list_presences_for_event(&self, event_id: Uuid) -> Result<Vec<Presence>> {
        self.presences().list_for_event(event_id)
    }

    fn set_presence_mark(
        &self,
        user_id: Uuid,
        attendance_list_id: Uuid,
        mark: PresenceMark,
    ) -> Result<()> {
        self.presences().set_mark(user_id, attendance_list_id, mark)
    }

    fn list_present_users(&self, attendance_list_id: Uuid) -> Result<Vec<MemberInfo>> {
        self.presences().present_users(attendance_list_id)
    }

    fn list_absent_users(&self, attendance_list_id: Uuid) -> Result<Vec<MemberInfo>> {
        self.presences().absent_users(attendance_list_id)
    }
}

impl Transactional for Database {
    fn atomic<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        if !self.conn.is_autocommit() {
            return f(self);
        }

        // Dropping the transaction without commit rolls it back
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_open_file_database_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rollcall.db");
        let corp = Corporation::new("Acme".into());

        {
            let db = Database::open(&path).unwrap();
            db.create_corporation(&corp).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert!(db.find_corporation_by_id(corp.id).unwrap().is_some());
        assert_eq!(db.schema_version().unwrap(), 2);
    }

    #[test]
    fn test_atomic_rolls_back_on_error() {
        let db = Database::open_in_memory().unwrap();
        let corp = Corporation::new("Acme".into());

        let result: Result<()> = db.atomic(|db| {
            db.create_corporation(&corp)?;
            Err(Error::InvalidInput("abort".into()))
        });

        assert!(result.is_err());
        assert!(db.find_corporation_by_id(corp.id).unwrap().is_none());
    }

    #[test]
    fn test_atomic_nested_joins_outer() {
        let db = Database::open_in_memory().unwrap();
        let outer = Corporation::new("Outer".into());
        let inner = Corporation::new("Inner".into());

        let result: Result<()> = db.atomic(|db| {
            db.create_corporation(&outer)?;
            db.atomic(|db| db.create_corporation(&inner))?;
            Err(Error::InvalidInput("abort".into()))
        });

        assert!(result.is_err());
        assert!(db.find_corporation_by_id(outer.id).unwrap().is_none());
        assert!(db.find_corporation_by_id(inner.id).unwrap().is_none());
    }

    #[test]
    fn test_atomic_commits() {
        let db = Database::open_in_memory().unwrap();
        let corp = Corporation::new("Acme".into());

        db.atomic(|db| db.create_corporation(&corp)).unwrap();
        assert!(db.find_corporation_by_id(corp.id).unwrap().is_some());
    }
}

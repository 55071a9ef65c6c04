//! Storage repository traits
//!
//! These traits define the storage interface the services are written
//! against. `Database` implements all of them over SQLite.

use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    AttendanceList, Corporation, Event, EventSummary, MemberInfo, Membership, Presence,
    PresenceMark, Room, User, UserRole,
};

/// User repository operations
pub trait UserRepository {
    /// Register a user (email must be unique)
    fn create_user(&self, user: &User) -> Result<()>;

    /// Find user by ID, with owned corporations
    fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Find user by email
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Change a user's role
    fn update_user_role(&self, user_id: Uuid, role: UserRole) -> Result<()>;

    /// Add a corporation to the user's owned set
    fn grant_corporation(&self, user_id: Uuid, corporation_id: Uuid) -> Result<()>;
}

/// Room and corporation lookups
pub trait DirectoryRepository {
    fn create_corporation(&self, corporation: &Corporation) -> Result<()>;

    fn create_room(&self, room: &Room) -> Result<()>;

    fn find_corporation_by_id(&self, id: Uuid) -> Result<Option<Corporation>>;

    fn find_room_by_id(&self, id: Uuid) -> Result<Option<Room>>;
}

/// Event repository operations
pub trait EventRepository {
    fn create_event(&self, event: &Event) -> Result<()>;

    fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    fn find_event_by_name_and_room(&self, name: &str, room_id: Uuid) -> Result<Option<Event>>;

    fn find_event_by_password(&self, password: &str) -> Result<Option<Event>>;

    /// Whether any event other than `excluding` uses the password
    fn password_in_use(&self, password: &str, excluding: Option<Uuid>) -> Result<bool>;

    /// Persist name, password and room of an existing event
    fn update_event(&self, event: &Event) -> Result<()>;

    fn list_event_summaries(&self) -> Result<Vec<EventSummary>>;

    fn list_events_administered_by(&self, user_id: Uuid) -> Result<Vec<EventSummary>>;

    fn list_events_for_member(&self, user_id: Uuid) -> Result<Vec<EventSummary>>;

    fn list_events_for_corporation(&self, corporation_id: Uuid) -> Result<Vec<Event>>;
}

/// Membership directory (the user/event relation)
pub trait MembershipRepository {
    fn add_member(&self, membership: &Membership) -> Result<()>;

    fn is_member(&self, user_id: Uuid, event_id: Uuid) -> Result<bool>;

    fn list_member_ids(&self, event_id: Uuid) -> Result<Vec<Uuid>>;

    fn list_members(&self, event_id: Uuid) -> Result<Vec<MemberInfo>>;
}

/// Attendance list repository operations
pub trait AttendanceRepository {
    fn create_attendance_list(&self, list: &AttendanceList) -> Result<()>;

    fn find_attendance_list_by_id(&self, id: Uuid) -> Result<Option<AttendanceList>>;

    fn list_attendance_lists_for_event(&self, event_id: Uuid) -> Result<Vec<AttendanceList>>;

    fn list_attendance_lists_for_user(&self, user_id: Uuid) -> Result<Vec<AttendanceList>>;
}

/// Presence repository operations
pub trait PresenceRepository {
    /// Insert rows, skipping existing (user, list) pairs; returns rows written
    fn insert_presences(&self, presences: &[Presence]) -> Result<usize>;

    fn list_presences_for_event(&self, event_id: Uuid) -> Result<Vec<Presence>>;

    fn set_presence_mark(
        &self,
        user_id: Uuid,
        attendance_list_id: Uuid,
        mark: PresenceMark,
    ) -> Result<()>;

    fn list_present_users(&self, attendance_list_id: Uuid) -> Result<Vec<MemberInfo>>;

    fn list_absent_users(&self, attendance_list_id: Uuid) -> Result<Vec<MemberInfo>>;
}

/// All-or-nothing execution of several repository calls
pub trait Transactional {
    /// Run `f` in a transaction, committing only if it returns `Ok`
    ///
    /// Calls made while a transaction is already open join it.
    fn atomic<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>;
}

/// Combined storage interface
pub trait Storage:
    UserRepository
    + DirectoryRepository
    + EventRepository
    + MembershipRepository
    + AttendanceRepository
    + PresenceRepository
    + Transactional
{
}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where
    T: UserRepository
        + DirectoryRepository
        + EventRepository
        + MembershipRepository
        + AttendanceRepository
        + PresenceRepository
        + Transactional
{
}

//! Event and membership storage operations

use rusqlite::{params, Connection, Params, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{CorporationSummary, Event, EventSummary, MemberInfo, Membership, RoomSummary};

const EVENT_COLUMNS: &str = "e.id, e.name, e.administrator_id, e.password, e.room_id, e.created_at";

const SUMMARY_SELECT: &str = "SELECT e.id, e.name, e.administrator_id, e.password,
        r.id, r.name, c.id, c.name
     FROM events e
     INNER JOIN rooms r ON r.id = e.room_id
     INNER JOIN corporations c ON c.id = r.corporation_id";

pub struct EventStore<'a> {
    conn: &'a Connection,
}

impl<'a> EventStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new event
    #[instrument(skip(self, event), fields(event_id = %event.id, room_id = %event.room_id))]
    pub fn create(&self, event: &Event) -> Result<()> {
        self.conn.execute(
            "INSERT INTO events (id, name, administrator_id, password, room_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                event.id.to_string(),
                event.name,
                event.administrator_id.to_string(),
                event.password,
                event.room_id.to_string(),
                event.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find event by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        self.find_one(
            &format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.id = ?1"),
            params![id.to_string()],
        )
    }

    /// Find the event with this name in this room
    #[instrument(skip(self))]
    pub fn find_by_name_and_room(&self, name: &str, room_id: Uuid) -> Result<Option<Event>> {
        self.find_one(
            &format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.name = ?1 AND e.room_id = ?2"),
            params![name, room_id.to_string()],
        )
    }

    /// Find event by its join password
    #[instrument(skip(self, password))]
    pub fn find_by_password(&self, password: &str) -> Result<Option<Event>> {
        self.find_one(
            &format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.password = ?1"),
            params![password],
        )
    }

    /// Is the password used by any event other than `excluding`?
    #[instrument(skip(self, password))]
    pub fn password_in_use(&self, password: &str, excluding: Option<Uuid>) -> Result<bool> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM events WHERE password = ?1 AND (?2 IS NULL OR id != ?2)",
            params![password, excluding.map(|id| id.to_string())],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Replace name, password and room of an event in one statement
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    pub fn update(&self, event: &Event) -> Result<()> {
        self.conn.execute(
            "UPDATE events SET name = ?1, password = ?2, room_id = ?3 WHERE id = ?4",
            params![
                event.name,
                event.password,
                event.room_id.to_string(),
                event.id.to_string(),
            ],
        )?;
        Ok(())
    }

    /// Every event, by name
    #[instrument(skip(self))]
    pub fn list_summaries(&self) -> Result<Vec<EventSummary>> {
        self.summaries(&format!("{SUMMARY_SELECT} ORDER BY e.name, e.id"), params![])
    }

    /// Events whose administrator is `user_id`
    #[instrument(skip(self))]
    pub fn list_administered_by(&self, user_id: Uuid) -> Result<Vec<EventSummary>> {
        self.summaries(
            &format!("{SUMMARY_SELECT} WHERE e.administrator_id = ?1 ORDER BY e.name, e.id"),
            params![user_id.to_string()],
        )
    }

    /// Events `user_id` is a member of
    #[instrument(skip(self))]
    pub fn list_for_member(&self, user_id: Uuid) -> Result<Vec<EventSummary>> {
        self.summaries(
            &format!(
                "{SUMMARY_SELECT}
                 INNER JOIN events_users m ON m.event_id = e.id
                 WHERE m.user_id = ?1
                 ORDER BY e.name, e.id"
            ),
            params![user_id.to_string()],
        )
    }

    /// Events hosted in any room of a corporation
    #[instrument(skip(self))]
    pub fn list_for_corporation(&self, corporation_id: Uuid) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events e
             INNER JOIN rooms r ON r.id = e.room_id
             WHERE r.corporation_id = ?1
             ORDER BY e.name, e.id"
        ))?;

        let events = stmt
            .query_map(params![corporation_id.to_string()], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Add membership
    #[instrument(
        skip(self, membership),
        fields(user_id = %membership.user_id, event_id = %membership.event_id)
    )]
    pub fn add_member(&self, membership: &Membership) -> Result<()> {
        self.conn.execute(
            "INSERT INTO events_users (event_id, user_id, joined_at) VALUES (?1, ?2, ?3)",
            params![
                membership.event_id.to_string(),
                membership.user_id.to_string(),
                membership.joined_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn is_member(&self, user_id: Uuid, event_id: Uuid) -> Result<bool> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM events_users WHERE user_id = ?1 AND event_id = ?2",
            params![user_id.to_string(), event_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    pub fn member_ids(&self, event_id: Uuid) -> Result<Vec<Uuid>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id FROM events_users WHERE event_id = ?1 ORDER BY joined_at, user_id",
        )?;

        let ids = stmt
            .query_map(params![event_id.to_string()], |row| {
                parse_uuid(&row.get::<_, String>(0)?)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ids)
    }

    /// List members of an event with user info
    #[instrument(skip(self))]
    pub fn list_members(&self, event_id: Uuid) -> Result<Vec<MemberInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT u.id, u.email, u.name
             FROM events_users m
             INNER JOIN users u ON u.id = m.user_id
             WHERE m.event_id = ?1
             ORDER BY u.name, u.email",
        )?;

        let members = stmt
            .query_map(params![event_id.to_string()], |row| {
                Ok(MemberInfo {
                    user_id: parse_uuid(&row.get::<_, String>(0)?)?,
                    email: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(members)
    }

    fn find_one<P: Params>(&self, sql: &str, params: P) -> Result<Option<Event>> {
        let event = self
            .conn
            .query_row(sql, params, event_from_row)
            .optional()?;
        Ok(event)
    }

    fn summaries<P: Params>(&self, sql: &str, params: P) -> Result<Vec<EventSummary>> {
        let mut stmt = self.conn.prepare(sql)?;

        let events = stmt
            .query_map(params, |row| {
                Ok(EventSummary {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                    administrator_id: parse_uuid(&row.get::<_, String>(2)?)?,
                    password: row.get(3)?,
                    room: RoomSummary {
                        id: parse_uuid(&row.get::<_, String>(4)?)?,
                        name: row.get(5)?,
                        corporation: CorporationSummary {
                            id: parse_uuid(&row.get::<_, String>(6)?)?,
                            name: row.get(7)?,
                        },
                    },
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }
}

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        name: row.get(1)?,
        administrator_id: parse_uuid(&row.get::<_, String>(2)?)?,
        password: row.get(3)?,
        room_id: parse_uuid(&row.get::<_, String>(4)?)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?)?,
    })
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::models::{Corporation, Event, Membership, Room, User, UserRole};
    use crate::storage::Database;

    struct Fixture {
        db: Database,
        corp: Corporation,
        room: Room,
        admin: User,
    }

    fn setup() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        let corp = Corporation::new("Acme".into());
        db.directory().create_corporation(&corp).unwrap();
        let room = Room::new("B-101".into(), corp.id);
        db.directory().create_room(&room).unwrap();
        let admin = User::new("admin@acme.test".into(), "Ada".into(), UserRole::Member);
        db.users().create(&admin).unwrap();
        Fixture {
            db,
            corp,
            room,
            admin,
        }
    }

    #[test]
    fn test_create_and_find_event() {
        let f = setup();
        let event = Event::new("Standup".into(), "s3cret".into(), f.room.id, f.admin.id);
        f.db.events().create(&event).unwrap();

        let store = f.db.events();
        assert_eq!(store.find_by_id(event.id).unwrap().unwrap(), event);
        assert_eq!(
            store
                .find_by_name_and_room("Standup", f.room.id)
                .unwrap()
                .unwrap()
                .id,
            event.id
        );
        assert_eq!(store.find_by_password("s3cret").unwrap().unwrap().id, event.id);
        assert!(store.find_by_password("other").unwrap().is_none());
    }

    #[test]
    fn test_schema_enforces_uniqueness() {
        let f = setup();
        let store = f.db.events();
        store
            .create(&Event::new("Standup".into(), "one".into(), f.room.id, f.admin.id))
            .unwrap();

        let same_name = Event::new("Standup".into(), "two".into(), f.room.id, f.admin.id);
        assert!(store.create(&same_name).unwrap_err().is_unique_violation());

        let same_password = Event::new("Retro".into(), "one".into(), f.room.id, f.admin.id);
        assert!(store
            .create(&same_password)
            .unwrap_err()
            .is_unique_violation());
    }

    #[test]
    fn test_password_in_use_excludes_self() {
        let f = setup();
        let event = Event::new("Standup".into(), "pw".into(), f.room.id, f.admin.id);
        f.db.events().create(&event).unwrap();

        assert!(f.db.events().password_in_use("pw", None).unwrap());
        assert!(!f.db.events().password_in_use("pw", Some(event.id)).unwrap());
        assert!(!f.db.events().password_in_use("free", None).unwrap());
    }

    #[test]
    fn test_summaries_and_listings() {
        let f = setup();
        let store = f.db.events();
        let other = User::new("o@acme.test".into(), "Oz".into(), UserRole::Member);
        f.db.users().create(&other).unwrap();

        let b = Event::new("Beta".into(), "b".into(), f.room.id, f.admin.id);
        let a = Event::new("Alpha".into(), "a".into(), f.room.id, other.id);
        store.create(&b).unwrap();
        store.create(&a).unwrap();

        let all = store.list_summaries().unwrap();
        let names: Vec<_> = all.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
        assert_eq!(all[0].room.corporation.id, f.corp.id);
        assert_eq!(all[0].room.name, "B-101");

        let mine = store.list_administered_by(f.admin.id).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, b.id);

        assert_eq!(store.list_for_corporation(f.corp.id).unwrap().len(), 2);
        assert!(store.list_for_corporation(Uuid::new_v4()).unwrap().is_empty());
    }

    #[test]
    fn test_membership() {
        let f = setup();
        let store = f.db.events();
        let event = Event::new("Standup".into(), "pw".into(), f.room.id, f.admin.id);
        store.create(&event).unwrap();

        let member = User::new("m@acme.test".into(), "Mo".into(), UserRole::Member);
        f.db.users().create(&member).unwrap();

        assert!(!store.is_member(member.id, event.id).unwrap());
        store.add_member(&Membership::new(member.id, event.id)).unwrap();
        assert!(store.is_member(member.id, event.id).unwrap());

        // The relation key rejects a second row
        let again = store
            .add_member(&Membership::new(member.id, event.id))
            .unwrap_err();
        assert!(again.is_unique_violation());

        assert_eq!(store.member_ids(event.id).unwrap(), vec![member.id]);
        let members = store.list_members(event.id).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].email, "m@acme.test");

        let joined = store.list_for_member(member.id).unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].id, event.id);
    }
}

//! Presence storage operations

use rusqlite::{params, Connection, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::parse::{mark_from_sql, mark_to_sql, parse_uuid};
use crate::error::{Error, Result};
use crate::models::{MemberInfo, Presence, PresenceMark};

pub struct PresenceStore<'a> {
    conn: &'a Connection,
}

impl<'a> PresenceStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert presence rows, skipping pairs that already exist
    ///
    /// Returns the number of rows actually written.
    #[instrument(skip(self, presences), fields(count = presences.len()))]
    pub fn insert_batch(&self, presences: &[Presence]) -> Result<usize> {
        let mut stmt = self.conn.prepare(
            "INSERT OR IGNORE INTO presences (id, user_id, attendance_list_id, mark)
             VALUES (?1, ?2, ?3, ?4)",
        )?;

        let mut written = 0;
        for presence in presences {
            written += stmt.execute(params![
                presence.id.to_string(),
                presence.user_id.to_string(),
                presence.attendance_list_id.to_string(),
                mark_to_sql(presence.mark),
            ])?;
        }

        debug!(written, "Presence batch stored");
        Ok(written)
    }

    /// Rows of every attendance list of one event
    #[instrument(skip(self))]
    pub fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Presence>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.user_id, p.attendance_list_id, p.mark
             FROM presences p
             INNER JOIN attendance_lists a ON a.id = p.attendance_list_id
             WHERE a.event_id = ?1
             ORDER BY p.attendance_list_id, p.user_id",
        )?;

        let presences = stmt
            .query_map(params![event_id.to_string()], presence_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(presences)
    }

    /// Record a user's mark on a list
    #[instrument(skip(self))]
    pub fn set_mark(
        &self,
        user_id: Uuid,
        attendance_list_id: Uuid,
        mark: PresenceMark,
    ) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE presences SET mark = ?1 WHERE user_id = ?2 AND attendance_list_id = ?3",
            params![
                mark_to_sql(mark),
                user_id.to_string(),
                attendance_list_id.to_string()
            ],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!(
                "presence of user {user_id} on list {attendance_list_id}"
            )));
        }
        Ok(())
    }

    /// Users marked present on a list
    #[instrument(skip(self))]
    pub fn present_users(&self, attendance_list_id: Uuid) -> Result<Vec<MemberInfo>> {
        self.users_where(attendance_list_id, "p.mark = 1")
    }

    /// Users not marked present (absent or not recorded)
    #[instrument(skip(self))]
    pub fn absent_users(&self, attendance_list_id: Uuid) -> Result<Vec<MemberInfo>> {
        self.users_where(attendance_list_id, "(p.mark IS NULL OR p.mark = 0)")
    }

    fn users_where(&self, attendance_list_id: Uuid, condition: &str) -> Result<Vec<MemberInfo>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT u.id, u.email, u.name
             FROM presences p
             INNER JOIN users u ON u.id = p.user_id
             WHERE p.attendance_list_id = ?1 AND {condition}
             ORDER BY u.name, u.email"
        ))?;

        let users = stmt
            .query_map(params![attendance_list_id.to_string()], |row| {
                Ok(MemberInfo {
                    user_id: parse_uuid(&row.get::<_, String>(0)?)?,
                    email: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }
}

fn presence_from_row(row: &Row<'_>) -> rusqlite::Result<Presence> {
    Ok(Presence {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        user_id: parse_uuid(&row.get::<_, String>(1)?)?,
        attendance_list_id: parse_uuid(&row.get::<_, String>(2)?)?,
        mark: mark_from_sql(row.get::<_, Option<i32>>(3)?),
    })
}

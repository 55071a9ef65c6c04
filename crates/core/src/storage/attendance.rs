//! Attendance list storage operations

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::AttendanceList;

pub struct AttendanceStore<'a> {
    conn: &'a Connection,
}

impl<'a> AttendanceStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new attendance list
    #[instrument(skip(self, list), fields(list_id = %list.id, event_id = %list.event_id))]
    pub fn create(&self, list: &AttendanceList) -> Result<()> {
        self.conn.execute(
            "INSERT INTO attendance_lists (id, event_id, name, start_time, end_time, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                list.id.to_string(),
                list.event_id.to_string(),
                list.name,
                list.start_time.to_rfc3339(),
                list.end_time.to_rfc3339(),
                list.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Find attendance list by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<AttendanceList>> {
        let list = self
            .conn
            .query_row(
                "SELECT id, event_id, name, start_time, end_time, created_at
                 FROM attendance_lists WHERE id = ?1",
                params![id.to_string()],
                list_from_row,
            )
            .optional()?;

        Ok(list)
    }

    /// Lists of one event, earliest first
    #[instrument(skip(self))]
    pub fn list_for_event(&self, event_id: Uuid) -> Result<Vec<AttendanceList>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, event_id, name, start_time, end_time, created_at
             FROM attendance_lists WHERE event_id = ?1
             ORDER BY start_time, id",
        )?;

        let lists = stmt
            .query_map(params![event_id.to_string()], list_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(lists)
    }

    /// Lists of every event the user belongs to, earliest first
    #[instrument(skip(self))]
    pub fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AttendanceList>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.event_id, a.name, a.start_time, a.end_time, a.created_at
             FROM attendance_lists a
             INNER JOIN events_users m ON m.event_id = a.event_id
             WHERE m.user_id = ?1
             ORDER BY a.start_time, a.id",
        )?;

        let lists = stmt
            .query_map(params![user_id.to_string()], list_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(lists)
    }
}

fn list_from_row(row: &Row<'_>) -> rusqlite::Result<AttendanceList> {
    Ok(AttendanceList {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        event_id: parse_uuid(&row.get::<_, String>(1)?)?,
        name: row.get(2)?,
        start_time: parse_datetime(&row.get::<_, String>(3)?)?,
        end_time: parse_datetime(&row.get::<_, String>(4)?)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?)?,
    })
}

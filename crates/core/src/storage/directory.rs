//! Corporation and room lookups
//!
//! Rooms and corporations are managed outside this crate; the insert
//! operations exist for seeding and tests.

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_uuid, OptionalExt};
use crate::error::Result;
use crate::models::{Corporation, Room};

pub struct DirectoryStore<'a> {
    conn: &'a Connection,
}

impl<'a> DirectoryStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    #[instrument(skip(self, corporation), fields(corporation_id = %corporation.id))]
    pub fn create_corporation(&self, corporation: &Corporation) -> Result<()> {
        self.conn.execute(
            "INSERT INTO corporations (id, name) VALUES (?1, ?2)",
            params![corporation.id.to_string(), corporation.name],
        )?;
        Ok(())
    }

    #[instrument(
        skip(self, room),
        fields(room_id = %room.id, corporation_id = %room.corporation_id)
    )]
    pub fn create_room(&self, room: &Room) -> Result<()> {
        self.conn.execute(
            "INSERT INTO rooms (id, name, corporation_id) VALUES (?1, ?2, ?3)",
            params![
                room.id.to_string(),
                room.name,
                room.corporation_id.to_string()
            ],
        )?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn find_corporation_by_id(&self, id: Uuid) -> Result<Option<Corporation>> {
        let corporation = self
            .conn
            .query_row(
                "SELECT id, name FROM corporations WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok(Corporation {
                        id: parse_uuid(&row.get::<_, String>(0)?)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(corporation)
    }

    #[instrument(skip(self))]
    pub fn find_room_by_id(&self, id: Uuid) -> Result<Option<Room>> {
        let room = self
            .conn
            .query_row(
                "SELECT id, name, corporation_id FROM rooms WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok(Room {
                        id: parse_uuid(&row.get::<_, String>(0)?)?,
                        name: row.get(1)?,
                        corporation_id: parse_uuid(&row.get::<_, String>(2)?)?,
                    })
                },
            )
            .optional()?;

        Ok(room)
    }

    /// Rooms of a corporation, by name
    #[instrument(skip(self))]
    pub fn list_rooms_for_corporation(&self, corporation_id: Uuid) -> Result<Vec<Room>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, corporation_id FROM rooms WHERE corporation_id = ?1 ORDER BY name",
        )?;

        let rooms = stmt
            .query_map(params![corporation_id.to_string()], |row| {
                Ok(Room {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                    corporation_id: parse_uuid(&row.get::<_, String>(2)?)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rooms)
    }
}

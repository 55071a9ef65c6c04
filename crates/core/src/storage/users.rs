//! User storage operations

use std::collections::BTreeSet;

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid, role_from_u8, OptionalExt};
use crate::error::{Error, Result};
use crate::models::{User, UserRole};

pub struct UserStore<'a> {
    conn: &'a Connection,
}

impl<'a> UserStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new user along with the corporations it owns
    #[instrument(skip(self, user), fields(user_id = %user.id, role = ?user.role))]
    pub fn create(&self, user: &User) -> Result<()> {
        // Join an enclosing transaction when there is one
        let tx = if self.conn.is_autocommit() {
            Some(self.conn.unchecked_transaction()?)
        } else {
            None
        };

        let inserted = self.conn.execute(
            "INSERT INTO users (id, email, name, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                user.email,
                user.name,
                user.role as u8,
                user.created_at.to_rfc3339(),
            ],
        );

        match inserted.map_err(Error::from) {
            Ok(_) => {}
            Err(e) if e.is_unique_violation() => {
                return Err(Error::AlreadyExists(format!(
                    "user with email {}",
                    user.email
                )));
            }
            Err(e) => return Err(e),
        }

        for corporation_id in &user.corporations {
            self.grant_corporation(user.id, *corporation_id)?;
        }

        if let Some(tx) = tx {
            tx.commit()?;
        }
        Ok(())
    }

    /// Find user by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, email, name, role, created_at FROM users WHERE id = ?1",
                params![id.to_string()],
                user_from_row,
            )
            .optional()?;

        self.with_corporations(user)
    }

    /// Find user by email
    #[instrument(skip(self))]
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, email, name, role, created_at FROM users WHERE email = ?1",
                params![email],
                user_from_row,
            )
            .optional()?;

        self.with_corporations(user)
    }

    /// Change a user's platform role
    #[instrument(skip(self))]
    pub fn update_role(&self, user_id: Uuid, role: UserRole) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE users SET role = ?1 WHERE id = ?2",
            params![role as u8, user_id.to_string()],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    /// Record that a user owns a corporation
    #[instrument(skip(self))]
    pub fn grant_corporation(&self, user_id: Uuid, corporation_id: Uuid) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO corporation_owners (user_id, corporation_id) VALUES (?1, ?2)",
            params![user_id.to_string(), corporation_id.to_string()],
        )?;
        Ok(())
    }

    fn corporations_of(&self, user_id: Uuid) -> Result<BTreeSet<Uuid>> {
        let mut stmt = self
            .conn
            .prepare("SELECT corporation_id FROM corporation_owners WHERE user_id = ?1")?;

        let corporations = stmt
            .query_map(params![user_id.to_string()], |row| {
                parse_uuid(&row.get::<_, String>(0)?)
            })?
            .collect::<std::result::Result<BTreeSet<_>, _>>()?;

        Ok(corporations)
    }

    fn with_corporations(&self, user: Option<User>) -> Result<Option<User>> {
        match user {
            Some(mut user) => {
                user.corporations = self.corporations_of(user.id)?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        email: row.get(1)?,
        name: row.get(2)?,
        role: role_from_u8(row.get::<_, u8>(3)?),
        corporations: BTreeSet::new(),
        created_at: parse_datetime(&row.get::<_, String>(4)?)?,
    })
}

//! User model

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Platform-wide roles in priority order (highest to lowest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum UserRole {
    /// Full control over every corporation and event
    PlatformAdmin = 3,
    /// Manages the events hosted in rooms of the corporations they own
    CorporationOwner = 2,
    /// Regular participant
    Member = 1,
}

impl UserRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::PlatformAdmin => "Platform Admin",
            UserRole::CorporationOwner => "Corporation Owner",
            UserRole::Member => "Member",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Corporations owned by this user (only meaningful for owners)
    pub corporations: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: String, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            role,
            corporations: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_corporation(mut self, corporation_id: Uuid) -> Self {
        self.corporations.insert(corporation_id);
        self
    }
}

/// A user as shown in member and presence listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
}

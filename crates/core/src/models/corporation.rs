//! Corporations and the rooms they own

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant boundary owning a set of rooms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corporation {
    pub id: Uuid,
    pub name: String,
}

impl Corporation {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// A room hosting events, owned by exactly one corporation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub corporation_id: Uuid,
}

impl Room {
    pub fn new(name: String, corporation_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            corporation_id,
        }
    }
}

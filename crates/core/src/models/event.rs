//! Event model and its read projections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled activity hosted in a room
///
/// Members are not held inline; membership lives in the `events_users`
/// relation and is queried through the membership repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub administrator_id: Uuid,
    /// Shared join secret, unique across all events
    pub password: String,
    pub room_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(name: String, password: String, room_id: Uuid, administrator_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            administrator_id,
            password,
            room_id,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub password: String,
    pub room_id: Uuid,
}

/// Input for editing an event
///
/// All three fields are replaced; `room_id` is optional only so a missing
/// room can be rejected as invalid input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUpdate {
    pub name: String,
    pub room_id: Option<Uuid>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporationSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: Uuid,
    pub name: String,
    pub corporation: CorporationSummary,
}

/// Event with its room and corporation resolved, for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: Uuid,
    pub name: String,
    pub administrator_id: Uuid,
    pub password: String,
    pub room: RoomSummary,
}

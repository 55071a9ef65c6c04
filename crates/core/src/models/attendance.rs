//! Attendance list model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A time-bounded attendance-taking session of one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceList {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AttendanceList {
    pub fn new(
        event_id: Uuid,
        name: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            name,
            start_time,
            end_time,
            created_at: Utc::now(),
        }
    }

    /// End must not precede start
    pub fn is_well_formed(&self) -> bool {
        self.end_time >= self.start_time
    }
}

/// Input for scheduling an attendance list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttendanceList {
    pub event_id: Uuid,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: Uuid,
    pub name: String,
    pub corporation_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRoomSnapshot {
    pub id: Uuid,
    pub name: String,
    pub password: String,
    pub room: RoomSnapshot,
}

/// An attendance list paired with its event, room and corporation identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceListDetail {
    pub id: Uuid,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub event: EventRoomSnapshot,
}

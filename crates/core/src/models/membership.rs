//! Event membership model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's membership in an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(user_id: Uuid, event_id: Uuid) -> Self {
        Self {
            user_id,
            event_id,
            joined_at: Utc::now(),
        }
    }
}

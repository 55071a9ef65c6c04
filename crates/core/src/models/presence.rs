//! Presence model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attendance marker for one user on one list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PresenceMark {
    /// Not yet recorded; listed as absent
    #[default]
    Unmarked,
    Present,
    Absent,
}

/// A per-user, per-attendance-list record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub id: Uuid,
    pub user_id: Uuid,
    pub attendance_list_id: Uuid,
    pub mark: PresenceMark,
}

impl Presence {
    pub fn new(user_id: Uuid, attendance_list_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            attendance_list_id,
            mark: PresenceMark::Unmarked,
        }
    }
}

//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{AttendanceList, Event, Presence};

/// Validate that a persisted event is internally consistent
pub fn assert_event_invariants(event: &Event) {
    debug_assert!(
        event.name.chars().count() >= 2,
        "Event {} has a name shorter than 2 characters",
        event.id
    );

    debug_assert!(
        !event.password.trim().is_empty(),
        "Event {} has an empty password",
        event.id
    );

    debug_assert!(
        event.administrator_id != Uuid::nil(),
        "Event {} has nil administrator_id",
        event.id
    );
}

/// Validate that an attendance window does not end before it starts
pub fn assert_attendance_window(list: &AttendanceList) {
    debug_assert!(
        list.is_well_formed(),
        "Attendance list {} ends at {} before it starts at {}",
        list.id,
        list.end_time,
        list.start_time
    );
}

/// (member, list) pairs with no presence row
pub fn missing_pairs(
    member_ids: &[Uuid],
    list_ids: &[Uuid],
    presences: &[Presence],
) -> Vec<(Uuid, Uuid)> {
    let existing: HashSet<(Uuid, Uuid)> = presences
        .iter()
        .map(|p| (p.user_id, p.attendance_list_id))
        .collect();

    list_ids
        .iter()
        .flat_map(|list_id| member_ids.iter().map(move |user_id| (*user_id, *list_id)))
        .filter(|pair| !existing.contains(pair))
        .collect()
}

//! Presence ledger
//!
//! Owns the per-user, per-attendance-list presence rows and keeps them equal
//! to the cross product of an event's members and its attendance lists.
//! Rows are only ever added.
//!
//! Materialization is two-phase: the `plan_*` functions compute the rows
//! without touching storage, then [`PresenceLedger`] writes them as one
//! batch. Callers run the write inside the same transaction as the primary
//! row (see [`Transactional`](crate::storage::Transactional)).

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::Result;
use crate::invariants::missing_pairs;
use crate::lookup;
use crate::models::{AttendanceList, MemberInfo, Presence};
use crate::storage::Storage;

/// Rows for a freshly created list: one per current member
pub fn plan_for_new_list(attendance_list_id: Uuid, member_ids: &[Uuid]) -> Vec<Presence> {
    member_ids
        .iter()
        .map(|user_id| Presence::new(*user_id, attendance_list_id))
        .collect()
}

/// Rows for a freshly joined member: one per existing list
pub fn plan_for_new_member(user_id: Uuid, attendance_list_ids: &[Uuid]) -> Vec<Presence> {
    attendance_list_ids
        .iter()
        .map(|list_id| Presence::new(user_id, *list_id))
        .collect()
}

pub struct PresenceLedger<'s, S> {
    storage: &'s S,
}

impl<'s, S: Storage> PresenceLedger<'s, S> {
    pub fn new(storage: &'s S) -> Self {
        Self { storage }
    }

    /// Create an unmarked row on the list for each member id
    #[instrument(skip(self, member_ids), fields(members = member_ids.len()))]
    pub fn materialize_for_new_list(
        &self,
        attendance_list_id: Uuid,
        member_ids: &[Uuid],
    ) -> Result<usize> {
        let rows = plan_for_new_list(attendance_list_id, member_ids);
        let written = self.storage.insert_presences(&rows)?;
        info!(%attendance_list_id, written, "Materialized presence for new list");
        Ok(written)
    }

    /// Create an unmarked row for the user on every list of the event
    #[instrument(skip(self))]
    pub fn materialize_for_new_member(&self, user_id: Uuid, event_id: Uuid) -> Result<usize> {
        let list_ids: Vec<Uuid> = self
            .storage
            .list_attendance_lists_for_event(event_id)?
            .into_iter()
            .map(|list| list.id)
            .collect();

        let rows = plan_for_new_member(user_id, &list_ids);
        let written = self.storage.insert_presences(&rows)?;
        info!(%user_id, %event_id, written, "Backfilled presence for new member");
        Ok(written)
    }

    /// Users marked present on the list
    #[instrument(skip(self))]
    pub fn list_present_users(&self, attendance_list_id: Uuid) -> Result<Vec<MemberInfo>> {
        lookup::attendance_list(self.storage, attendance_list_id)?;
        self.storage.list_present_users(attendance_list_id)
    }

    /// Users not marked present; rows never marked count as absent
    #[instrument(skip(self))]
    pub fn list_absent_users(&self, attendance_list_id: Uuid) -> Result<Vec<MemberInfo>> {
        lookup::attendance_list(self.storage, attendance_list_id)?;
        self.storage.list_absent_users(attendance_list_id)
    }

    pub fn get_attendance_list_by_id(&self, id: Uuid) -> Result<AttendanceList> {
        lookup::attendance_list(self.storage, id)
    }

    /// (user, list) pairs of the event that have no presence row
    ///
    /// Empty whenever the ledger is consistent.
    #[instrument(skip(self))]
    pub fn missing_presences(&self, event_id: Uuid) -> Result<Vec<(Uuid, Uuid)>> {
        let member_ids = self.storage.list_member_ids(event_id)?;
        let list_ids: Vec<Uuid> = self
            .storage
            .list_attendance_lists_for_event(event_id)?
            .into_iter()
            .map(|list| list.id)
            .collect();
        let presences = self.storage.list_presences_for_event(event_id)?;

        let missing = missing_pairs(&member_ids, &list_ids, &presences);
        debug!(%event_id, missing = missing.len(), "Presence audit");
        Ok(missing)
    }
}

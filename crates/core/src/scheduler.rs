//! Attendance scheduler
//!
//! Creates attendance lists for an event and serves list queries. A new list
//! gets a presence row for every member the event has at that moment.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::identity::Actor;
use crate::invariants;
use crate::ledger::PresenceLedger;
use crate::lookup;
use crate::models::{
    AttendanceList, AttendanceListDetail, EventRoomSnapshot, NewAttendanceList, RoomSnapshot,
};
use crate::permissions::can_schedule_attendance;
use crate::storage::Storage;

pub struct AttendanceScheduler<'s, S> {
    storage: &'s S,
}

impl<'s, S: Storage> AttendanceScheduler<'s, S> {
    pub fn new(storage: &'s S) -> Self {
        Self { storage }
    }

    /// Schedule a list and materialize presence for current members
    #[instrument(skip(self, actor, new), fields(actor = %actor.user_id, event_id = %new.event_id))]
    pub fn create_attendance_list(
        &self,
        actor: &Actor,
        new: NewAttendanceList,
    ) -> Result<AttendanceList> {
        if new.end_time < new.start_time {
            return Err(Error::InvalidTimeRange);
        }

        let event = lookup::event(self.storage, new.event_id)?;

        if !can_schedule_attendance(actor, &event) {
            warn!("Attendance scheduling denied");
            return Err(Error::PermissionDenied(format!(
                "cannot schedule attendance for event {}",
                event.id
            )));
        }

        let list = AttendanceList::new(event.id, new.name, new.start_time, new.end_time);
        invariants::assert_attendance_window(&list);

        let written = self.storage.atomic(|storage| {
            storage.create_attendance_list(&list)?;
            let member_ids = storage.list_member_ids(event.id)?;
            PresenceLedger::new(storage).materialize_for_new_list(list.id, &member_ids)
        })?;

        info!(list_id = %list.id, presences = written, "Attendance list created");
        Ok(list)
    }

    /// Lists of an event, by start time
    #[instrument(skip(self))]
    pub fn list_attendance_lists_for_event(&self, event_id: Uuid) -> Result<Vec<AttendanceList>> {
        self.storage.list_attendance_lists_for_event(event_id)
    }

    /// Lists of an event with the event, room and corporation id attached
    #[instrument(skip(self))]
    pub fn get_attendance_lists_with_event_detail(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<AttendanceListDetail>> {
        let event = lookup::event(self.storage, event_id)?;
        let lists = self.storage.list_attendance_lists_for_event(event.id)?;
        if lists.is_empty() {
            return Err(Error::NoListsFound);
        }

        let room = lookup::room(self.storage, event.room_id)?;
        let snapshot = EventRoomSnapshot {
            id: event.id,
            name: event.name,
            password: event.password,
            room: RoomSnapshot {
                id: room.id,
                name: room.name,
                corporation_id: room.corporation_id,
            },
        };

        Ok(lists
            .into_iter()
            .map(|list| AttendanceListDetail {
                id: list.id,
                name: list.name,
                start_time: list.start_time,
                end_time: list.end_time,
                event: snapshot.clone(),
            })
            .collect())
    }

    /// Lists of every event the user has joined
    #[instrument(skip(self))]
    pub fn list_attendance_lists_for_user(&self, user_id: Uuid) -> Result<Vec<AttendanceList>> {
        self.storage.list_attendance_lists_for_user(user_id)
    }
}

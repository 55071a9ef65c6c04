//! Required-entity lookups shared by the services

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{AttendanceList, Corporation, Event, Room};
use crate::storage::{AttendanceRepository, DirectoryRepository, EventRepository};

pub(crate) fn event<S: EventRepository + ?Sized>(storage: &S, id: Uuid) -> Result<Event> {
    storage
        .find_event_by_id(id)?
        .ok_or_else(|| Error::NotFound(format!("event {id}")))
}

pub(crate) fn room<S: DirectoryRepository + ?Sized>(storage: &S, id: Uuid) -> Result<Room> {
    storage
        .find_room_by_id(id)?
        .ok_or_else(|| Error::NotFound(format!("room {id}")))
}

pub(crate) fn corporation<S: DirectoryRepository + ?Sized>(
    storage: &S,
    id: Uuid,
) -> Result<Corporation> {
    storage
        .find_corporation_by_id(id)?
        .ok_or_else(|| Error::NotFound(format!("corporation {id}")))
}

pub(crate) fn attendance_list<S: AttendanceRepository + ?Sized>(
    storage: &S,
    id: Uuid,
) -> Result<AttendanceList> {
    storage
        .find_attendance_list_by_id(id)?
        .ok_or_else(|| Error::NotFound(format!("attendance list {id}")))
}

//! Authorization policy for events and corporations
//!
//! Pure decisions only. Services turn a `false` into
//! [`Error::PermissionDenied`](crate::Error::PermissionDenied).

use uuid::Uuid;

use crate::identity::Actor;
use crate::models::Event;

/// Actions gated by the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    // Corporation scope
    CreateEvent,
    ListCorporationEvents,

    // Event scope
    EditEvent,
    ListMembers,
    ScheduleAttendance,
}

/// An actor's standing over a corporation or one of its events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    PlatformAdmin,
    /// Owner of the given corporation
    CorporationOwner(Uuid),
    EventAdministrator,
    Member,
}

impl Authority {
    /// Standing over a corporation (event creation, corporation listings)
    pub fn over_corporation(actor: &Actor, corporation_id: Uuid) -> Self {
        if actor.is_platform_admin() {
            Authority::PlatformAdmin
        } else if actor.owns(corporation_id) {
            Authority::CorporationOwner(corporation_id)
        } else {
            Authority::Member
        }
    }

    /// Standing over an event hosted in a room of `corporation_id`
    ///
    /// The administrator relation wins over corporation ownership, so an owner
    /// who also administers the event may schedule attendance.
    pub fn over_event(actor: &Actor, event: &Event, corporation_id: Uuid) -> Self {
        if actor.is_platform_admin() {
            Authority::PlatformAdmin
        } else if actor.user_id == event.administrator_id {
            Authority::EventAdministrator
        } else if actor.owns(corporation_id) {
            Authority::CorporationOwner(corporation_id)
        } else {
            Authority::Member
        }
    }
}

/// Permission matrix for event operations
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Check if an authority may perform an action
    pub fn can_perform(authority: Authority, action: EventAction) -> bool {
        use Authority::*;

        match action {
            EventAction::CreateEvent | EventAction::ListCorporationEvents => {
                matches!(authority, PlatformAdmin | CorporationOwner(_))
            }

            EventAction::EditEvent | EventAction::ListMembers => matches!(
                authority,
                PlatformAdmin | EventAdministrator | CorporationOwner(_)
            ),

            // Owners are not authorized on their own here
            EventAction::ScheduleAttendance => {
                matches!(authority, PlatformAdmin | EventAdministrator)
            }
        }
    }
}

/// May the actor edit the event or see its roster?
pub fn can_manage_event(actor: &Actor, event: &Event, corporation_id: Uuid) -> bool {
    PermissionMatrix::can_perform(
        Authority::over_event(actor, event, corporation_id),
        EventAction::EditEvent,
    )
}

/// May the actor create events in, or list events of, the corporation?
pub fn can_manage_corporation(actor: &Actor, corporation_id: Uuid) -> bool {
    PermissionMatrix::can_perform(
        Authority::over_corporation(actor, corporation_id),
        EventAction::CreateEvent,
    )
}

/// May the actor create attendance lists for the event?
pub fn can_schedule_attendance(actor: &Actor, event: &Event) -> bool {
    let authority = if actor.is_platform_admin() {
        Authority::PlatformAdmin
    } else if actor.user_id == event.administrator_id {
        Authority::EventAdministrator
    } else {
        Authority::Member
    };
    PermissionMatrix::can_perform(authority, EventAction::ScheduleAttendance)
}

//! Event registry
//!
//! Creates, edits and queries events, and admits members by join password.
//! Every operation takes the caller as an explicit [`Actor`].

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::identity::Actor;
use crate::invariants;
use crate::ledger::PresenceLedger;
use crate::lookup;
use crate::models::{Event, EventSummary, EventUpdate, MemberInfo, Membership, NewEvent};
use crate::permissions::{can_manage_corporation, can_manage_event};
use crate::storage::Storage;

/// Shortest accepted event name, in characters
pub const MIN_EVENT_NAME_LEN: usize = 2;

pub struct EventRegistry<'s, S> {
    storage: &'s S,
}

impl<'s, S: Storage> EventRegistry<'s, S> {
    pub fn new(storage: &'s S) -> Self {
        Self { storage }
    }

    /// Create an event administered by the actor
    #[instrument(skip(self, actor, new), fields(actor = %actor.user_id, room_id = %new.room_id))]
    pub fn create_event(&self, actor: &Actor, new: NewEvent) -> Result<Event> {
        let room = lookup::room(self.storage, new.room_id)?;

        if !can_manage_corporation(actor, room.corporation_id) {
            warn!(corporation_id = %room.corporation_id, "Event creation denied");
            return Err(Error::PermissionDenied(format!(
                "cannot create events in corporation {}",
                room.corporation_id
            )));
        }

        let name = validate_name(&new.name)?;
        let password = validate_password(&new.password)?;

        let event = Event::new(name.to_string(), password.to_string(), room.id, actor.user_id);

        self.storage.atomic(|storage| {
            if storage
                .find_event_by_name_and_room(&event.name, room.id)?
                .is_some()
            {
                return Err(Error::AlreadyExists(format!(
                    "event {:?} in room {}",
                    event.name, room.name
                )));
            }
            if storage.password_in_use(&event.password, None)? {
                return Err(Error::PasswordConflict);
            }
            storage.create_event(&event)
        })?;

        invariants::assert_event_invariants(&event);
        info!(event_id = %event.id, name = %event.name, "Event created");
        Ok(event)
    }

    /// Replace an event's name, room and password
    ///
    /// Either every field changes or none does.
    #[instrument(skip(self, actor, update), fields(actor = %actor.user_id))]
    pub fn update_event(
        &self,
        actor: &Actor,
        event_id: Uuid,
        update: EventUpdate,
    ) -> Result<Event> {
        let event = lookup::event(self.storage, event_id)?;
        let current_room = lookup::room(self.storage, event.room_id)?;

        if !can_manage_event(actor, &event, current_room.corporation_id) {
            warn!(%event_id, "Event update denied");
            return Err(Error::PermissionDenied(format!("cannot edit event {event_id}")));
        }

        let name = validate_name(&update.name)?;
        let room_id = update
            .room_id
            .ok_or_else(|| Error::InvalidInput("room is required".into()))?;
        let password = validate_password(&update.password)?;

        let updated = self.storage.atomic(|storage| {
            if storage.password_in_use(password, Some(event.id))? {
                return Err(Error::PasswordConflict);
            }

            let new_room = lookup::room(storage, room_id)?;
            if new_room.corporation_id != current_room.corporation_id {
                warn!(
                    %event_id,
                    from = %current_room.id,
                    to = %new_room.id,
                    "Cross-corporation move rejected"
                );
                return Err(Error::CrossCorporationRoom);
            }

            if let Some(clash) = storage.find_event_by_name_and_room(name, new_room.id)? {
                if clash.id != event.id {
                    return Err(Error::AlreadyExists(format!(
                        "event {:?} in room {}",
                        name, new_room.name
                    )));
                }
            }

            let updated = Event {
                name: name.to_string(),
                password: password.to_string(),
                room_id: new_room.id,
                ..event.clone()
            };
            storage.update_event(&updated)?;
            Ok(updated)
        })?;

        invariants::assert_event_invariants(&updated);
        info!(%event_id, name = %updated.name, room_id = %updated.room_id, "Event updated");
        Ok(updated)
    }

    /// Events whose administrator is the user
    #[instrument(skip(self))]
    pub fn list_events_administered_by(&self, user_id: Uuid) -> Result<Vec<EventSummary>> {
        self.storage.list_events_administered_by(user_id)
    }

    /// Events the user has joined
    #[instrument(skip(self))]
    pub fn list_events_user_belongs_to(&self, user_id: Uuid) -> Result<Vec<EventSummary>> {
        self.storage.list_events_for_member(user_id)
    }

    /// Every event, ordered by name then id
    #[instrument(skip(self))]
    pub fn list_all_events(&self) -> Result<Vec<EventSummary>> {
        let events = self.storage.list_event_summaries()?;
        debug!(count = events.len(), "Listed events");
        Ok(events)
    }

    /// Events hosted in any room of the corporation
    #[instrument(skip(self, actor), fields(actor = %actor.user_id))]
    pub fn list_events_for_corporation(
        &self,
        actor: &Actor,
        corporation_id: Uuid,
    ) -> Result<Vec<Event>> {
        let corporation = lookup::corporation(self.storage, corporation_id)?;

        if !can_manage_corporation(actor, corporation.id) {
            warn!(%corporation_id, "Corporation listing denied");
            return Err(Error::PermissionDenied(format!(
                "cannot list events of corporation {}",
                corporation.name
            )));
        }

        self.storage.list_events_for_corporation(corporation.id)
    }

    /// Join the event whose password matches
    ///
    /// The membership row and the new member's presence on every existing
    /// attendance list are written together.
    #[instrument(skip(self, actor, password), fields(actor = %actor.user_id))]
    pub fn join_event(&self, actor: &Actor, password: &str) -> Result<Event> {
        if password.trim().is_empty() {
            return Err(Error::InvalidInput("password is required".into()));
        }

        let event = self.storage.atomic(|storage| {
            let event = storage
                .find_event_by_password(password)?
                .ok_or_else(|| Error::NotFound("event with that password".into()))?;

            if storage.is_member(actor.user_id, event.id)? {
                return Err(Error::AlreadyMember);
            }

            storage
                .add_member(&Membership::new(actor.user_id, event.id))
                .map_err(|e| {
                    if e.is_unique_violation() {
                        Error::AlreadyMember
                    } else {
                        e
                    }
                })?;

            PresenceLedger::new(storage).materialize_for_new_member(actor.user_id, event.id)?;
            Ok(event)
        })?;

        self.report_presence_gaps(actor.user_id, event.id);

        info!(event_id = %event.id, "Member joined event");
        Ok(event)
    }

    /// Roster of an event, by name
    #[instrument(skip(self, actor), fields(actor = %actor.user_id))]
    pub fn list_event_members(&self, actor: &Actor, event_id: Uuid) -> Result<Vec<MemberInfo>> {
        let event = lookup::event(self.storage, event_id)?;
        let room = lookup::room(self.storage, event.room_id)?;

        if !can_manage_event(actor, &event, room.corporation_id) {
            warn!(%event_id, "Member listing denied");
            return Err(Error::PermissionDenied(format!(
                "cannot list members of event {event_id}"
            )));
        }

        let members = self.storage.list_members(event.id)?;
        if members.is_empty() {
            return Err(Error::NoMembersFound);
        }
        Ok(members)
    }

    /// Audit the event after a committed join
    ///
    /// Only the joining member's pairs are guaranteed here; gaps left by
    /// other writers are logged for the audit command to pick up.
    fn report_presence_gaps(&self, user_id: Uuid, event_id: Uuid) {
        let missing = match PresenceLedger::new(self.storage).missing_presences(event_id) {
            Ok(missing) => missing,
            Err(e) => {
                warn!(%event_id, error = %e, "Presence audit after join failed");
                return;
            }
        };

        let (own, others): (Vec<_>, Vec<_>) =
            missing.into_iter().partition(|(member, _)| *member == user_id);
        debug_assert!(own.is_empty(), "Presence incomplete for new member: {own:?}");

        if !others.is_empty() {
            warn!(%event_id, missing = others.len(), "Event has members without presence rows");
        }
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.chars().count() < MIN_EVENT_NAME_LEN {
        return Err(Error::InvalidInput(format!(
            "event name must be at least {MIN_EVENT_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

fn validate_password(password: &str) -> Result<&str> {
    if password.trim().is_empty() {
        return Err(Error::InvalidInput("password is required".into()));
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceList, NewAttendanceList, PresenceMark};
    use crate::scheduler::AttendanceScheduler;
    use crate::storage::{
        AttendanceRepository, EventRepository, MembershipRepository, PresenceRepository,
    };
    use crate::test_support::{hours, monday_nine, World};

    fn new_event(name: &str, password: &str, room_id: Uuid) -> NewEvent {
        NewEvent {
            name: name.into(),
            password: password.into(),
            room_id,
        }
    }

    fn edit(name: &str, room_id: Uuid, password: &str) -> EventUpdate {
        EventUpdate {
            name: name.into(),
            room_id: Some(room_id),
            password: password.into(),
        }
    }

    #[test]
    fn test_owner_creates_event() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);

        let event = registry
            .create_event(&world.owner, new_event("Standup", "s3cret", world.hall_a.id))
            .unwrap();

        assert_eq!(event.administrator_id, world.owner.user_id);
        assert_eq!(world.db.find_event_by_id(event.id).unwrap(), Some(event));
    }

    #[test]
    fn test_create_rejects_duplicate_name_in_room() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        registry
            .create_event(&world.owner, new_event("Standup", "pw1", world.hall_a.id))
            .unwrap();

        let err = registry
            .create_event(&world.owner, new_event("Standup", "pw2", world.hall_a.id))
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));

        // Same name in another room is fine
        registry
            .create_event(&world.owner, new_event("Standup", "pw3", world.hall_b.id))
            .unwrap();
    }

    #[test]
    fn test_create_rejects_reused_password() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        registry
            .create_event(&world.owner, new_event("Standup", "pw", world.hall_a.id))
            .unwrap();

        let err = registry
            .create_event(&world.owner, new_event("Retro", "pw", world.hall_b.id))
            .unwrap_err();
        assert!(matches!(err, Error::PasswordConflict));
    }

    #[test]
    fn test_create_permissions() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let member = world.member("Mel");

        let err = registry
            .create_event(&member, new_event("Standup", "pw", world.hall_a.id))
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));

        // Owner of another corporation
        let err = registry
            .create_event(&world.rival_owner, new_event("Standup", "pw", world.hall_a.id))
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));

        registry
            .create_event(&world.platform_admin, new_event("Standup", "pw", world.lab.id))
            .unwrap();
    }

    #[test]
    fn test_create_validation_order() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);

        let err = registry
            .create_event(&world.owner, new_event("Standup", "pw", Uuid::new_v4()))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        // Permission is checked before the name
        let member = world.member("Mel");
        let err = registry
            .create_event(&member, new_event("X", "pw", world.hall_a.id))
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));

        let err = registry
            .create_event(&world.owner, new_event("X", "pw", world.hall_a.id))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = registry
            .create_event(&world.owner, new_event("Standup", "  ", world.hall_a.id))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_member_cannot_update() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Standup", "pw", &world.hall_a);
        let member = world.member("Mel");
        world.seed_member(&member, &event);

        let err = registry
            .update_event(&member, event.id, edit("Hijacked", world.hall_b.id, "mine"))
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));

        assert_eq!(world.db.find_event_by_id(event.id).unwrap(), Some(event));
    }

    #[test]
    fn test_update_by_each_manager() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let admin = world.member("Ada");
        let event = world.seed_event(&admin, "Standup", "pw", &world.hall_a);

        let renamed = registry
            .update_event(&admin, event.id, edit("Daily", world.hall_a.id, "pw"))
            .unwrap();
        assert_eq!(renamed.name, "Daily");

        let moved = registry
            .update_event(&world.owner, event.id, edit("Daily", world.hall_b.id, "pw2"))
            .unwrap();
        assert_eq!(moved.room_id, world.hall_b.id);

        registry
            .update_event(&world.platform_admin, event.id, edit("Daily", world.hall_b.id, "pw3"))
            .unwrap();

        let err = registry
            .update_event(&world.rival_owner, event.id, edit("Daily", world.hall_b.id, "pw4"))
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));

        let stored = world.db.find_event_by_id(event.id).unwrap().unwrap();
        assert_eq!(stored.password, "pw3");
        assert_eq!(stored.administrator_id, admin.user_id);
    }

    #[test]
    fn test_update_keeps_own_password() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Standup", "pw", &world.hall_a);

        let updated = registry
            .update_event(&world.owner, event.id, edit("Standup", world.hall_a.id, "pw"))
            .unwrap();
        assert_eq!(updated.password, "pw");
    }

    #[test]
    fn test_update_password_conflict() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Standup", "pw", &world.hall_a);
        world.seed_event(&world.owner, "Retro", "taken", &world.hall_a);

        let err = registry
            .update_event(&world.owner, event.id, edit("Standup", world.hall_a.id, "taken"))
            .unwrap_err();
        assert!(matches!(err, Error::PasswordConflict));
        assert_eq!(world.db.find_event_by_id(event.id).unwrap(), Some(event));
    }

    #[test]
    fn test_update_rejects_cross_corporation_room() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Standup", "pw", &world.hall_a);

        let err = registry
            .update_event(&world.platform_admin, event.id, edit("Renamed", world.lab.id, "new"))
            .unwrap_err();
        assert!(matches!(err, Error::CrossCorporationRoom));

        let stored = world.db.find_event_by_id(event.id).unwrap().unwrap();
        assert_eq!(stored.room_id, world.hall_a.id);
        assert_eq!(stored.name, "Standup");
        assert_eq!(stored.password, "pw");
    }

    #[test]
    fn test_update_rejects_name_clash() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Standup", "pw", &world.hall_a);
        world.seed_event(&world.owner, "Retro", "pw2", &world.hall_b);

        let err = registry
            .update_event(&world.owner, event.id, edit("Retro", world.hall_b.id, "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[test]
    fn test_update_input_errors() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Standup", "pw", &world.hall_a);

        let err = registry
            .update_event(&world.owner, Uuid::new_v4(), edit("Standup", world.hall_a.id, "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let no_room = EventUpdate {
            name: "Standup".into(),
            room_id: None,
            password: "pw".into(),
        };
        let err = registry.update_event(&world.owner, event.id, no_room).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = registry
            .update_event(&world.owner, event.id, edit("S", world.hall_a.id, "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = registry
            .update_event(&world.owner, event.id, edit("Standup", Uuid::new_v4(), "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_join_event() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Standup", "open-sesame", &world.hall_a);
        let member = world.member("Mel");

        let joined = registry.join_event(&member, "open-sesame").unwrap();
        assert_eq!(joined.id, event.id);
        assert!(world.db.is_member(member.user_id, event.id).unwrap());

        let mine = registry.list_events_user_belongs_to(member.user_id).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].room.corporation.id, world.acme.id);
    }

    #[test]
    fn test_join_unknown_password() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        world.seed_event(&world.owner, "Standup", "pw", &world.hall_a);
        let member = world.member("Mel");

        let err = registry.join_event(&member, "wrong").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(registry.list_events_user_belongs_to(member.user_id).unwrap().is_empty());

        let err = registry.join_event(&member, "").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_join_twice_changes_nothing() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Standup", "pw", &world.hall_a);
        let list = AttendanceList::new(
            event.id,
            "Week 1".into(),
            monday_nine(),
            monday_nine() + hours(1),
        );
        world.db.create_attendance_list(&list).unwrap();
        let member = world.member("Mel");

        registry.join_event(&member, "pw").unwrap();
        let members_after = world.db.list_member_ids(event.id).unwrap();
        let presences_after = world.db.list_presences_for_event(event.id).unwrap();
        assert_eq!(presences_after.len(), 1);

        let err = registry.join_event(&member, "pw").unwrap_err();
        assert!(matches!(err, Error::AlreadyMember));
        assert_eq!(world.db.list_member_ids(event.id).unwrap(), members_after);
        assert_eq!(world.db.list_presences_for_event(event.id).unwrap(), presences_after);
    }

    #[test]
    fn test_join_backfills_every_list() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let scheduler = AttendanceScheduler::new(&world.db);
        let event = world.seed_event(&world.owner, "Lecture", "pw", &world.hall_a);

        let founders: Vec<_> = ["Ann", "Ben", "Cal"].iter().map(|n| world.member(n)).collect();
        for founder in &founders {
            registry.join_event(founder, "pw").unwrap();
        }

        let list = scheduler
            .create_attendance_list(
                &world.owner,
                NewAttendanceList {
                    event_id: event.id,
                    name: "Week 1".into(),
                    start_time: monday_nine(),
                    end_time: monday_nine() + hours(2),
                },
            )
            .unwrap();
        assert_eq!(world.db.list_presences_for_event(event.id).unwrap().len(), 3);

        let dan = world.member("Dan");
        registry.join_event(&dan, "pw").unwrap();

        let presences = world.db.list_presences_for_event(event.id).unwrap();
        assert_eq!(presences.len(), 4);
        assert!(presences.iter().all(|p| p.mark == PresenceMark::Unmarked));
        assert!(presences
            .iter()
            .any(|p| p.user_id == dan.user_id && p.attendance_list_id == list.id));
    }

    #[test]
    fn test_join_event_with_existing_gap() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Lecture", "pw", &world.hall_a);
        let list = AttendanceList::new(event.id, "Week 1".into(), monday_nine(), monday_nine());
        world.db.create_attendance_list(&list).unwrap();

        // Membership written without a presence row
        let stray = world.member("Stray");
        world.seed_member(&stray, &event);

        let newcomer = world.member("Newcomer");
        registry.join_event(&newcomer, "pw").unwrap();

        let missing = PresenceLedger::new(&world.db).missing_presences(event.id).unwrap();
        assert_eq!(missing, vec![(stray.user_id, list.id)]);
        assert!(world
            .db
            .list_presences_for_event(event.id)
            .unwrap()
            .iter()
            .any(|p| p.user_id == newcomer.user_id && p.attendance_list_id == list.id));
    }

    #[test]
    fn test_cross_product_holds_under_interleaving() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let scheduler = AttendanceScheduler::new(&world.db);
        let event = world.seed_event(&world.owner, "Lecture", "pw", &world.hall_a);
        let ledger = PresenceLedger::new(&world.db);

        let schedule = |week: i64| {
            let start = monday_nine() + chrono::Duration::days(7 * week);
            scheduler
                .create_attendance_list(
                    &world.owner,
                    NewAttendanceList {
                        event_id: event.id,
                        name: format!("Week {week}"),
                        start_time: start,
                        end_time: start + hours(1),
                    },
                )
                .unwrap();
        };

        schedule(1);
        registry.join_event(&world.member("Ann"), "pw").unwrap();
        registry.join_event(&world.member("Ben"), "pw").unwrap();
        schedule(2);
        registry.join_event(&world.member("Cal"), "pw").unwrap();
        schedule(3);
        schedule(4);
        registry.join_event(&world.member("Dee"), "pw").unwrap();

        assert!(ledger.missing_presences(event.id).unwrap().is_empty());
        assert_eq!(world.db.list_presences_for_event(event.id).unwrap().len(), 4 * 4);
    }

    #[test]
    fn test_list_event_members() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let event = world.seed_event(&world.owner, "Standup", "pw", &world.hall_a);

        let err = registry.list_event_members(&world.owner, event.id).unwrap_err();
        assert!(matches!(err, Error::NoMembersFound));

        let bob = world.member("Bob");
        let amy = world.member("Amy");
        world.seed_member(&bob, &event);
        world.seed_member(&amy, &event);

        let members = registry.list_event_members(&world.owner, event.id).unwrap();
        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Bob"]);

        let err = registry.list_event_members(&bob, event.id).unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));

        let err = registry
            .list_event_members(&world.owner, Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_listings() {
        let world = World::new();
        let registry = EventRegistry::new(&world.db);
        let ada = world.member("Ada");
        world.seed_event(&ada, "Zeta", "pw1", &world.hall_a);
        world.seed_event(&world.owner, "Alpha", "pw2", &world.hall_b);
        world.seed_event(&world.rival_owner, "Mid", "pw3", &world.lab);

        let all = registry.list_all_events().unwrap();
        let names: Vec<_> = all.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);

        let administered = registry.list_events_administered_by(ada.user_id).unwrap();
        assert_eq!(administered.len(), 1);
        assert_eq!(administered[0].name, "Zeta");

        let acme_events = registry
            .list_events_for_corporation(&world.owner, world.acme.id)
            .unwrap();
        assert_eq!(acme_events.len(), 2);

        let err = registry
            .list_events_for_corporation(&world.rival_owner, world.acme.id)
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));

        let err = registry
            .list_events_for_corporation(&world.platform_admin, Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let globex = registry
            .list_events_for_corporation(&world.platform_admin, world.globex.id)
            .unwrap();
        assert_eq!(globex.len(), 1);
    }
}

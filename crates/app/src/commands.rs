//! Command execution against an open database

use rollcall_core::{AttendanceScheduler, Database, EventRegistry, PresenceLedger, Result};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::cli::Command;

/// Presence rows an event is missing
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub event_id: Uuid,
    pub event_name: String,
    pub missing: Vec<MissingPresence>,
}

#[derive(Debug, Serialize)]
pub struct MissingPresence {
    pub user_id: Uuid,
    pub attendance_list_id: Uuid,
}

/// Run a command and return its JSON output
pub fn run(db: &Database, command: &Command) -> Result<Value> {
    match command {
        Command::Migrate => Ok(serde_json::json!({
            "schema_version": db.schema_version()?,
        })),
        Command::Events => Ok(serde_json::to_value(
            EventRegistry::new(db).list_all_events()?,
        )?),
        Command::Lists { event_id } => Ok(serde_json::to_value(
            AttendanceScheduler::new(db).list_attendance_lists_for_event(*event_id)?,
        )?),
        Command::Audit => Ok(serde_json::to_value(audit(db)?)?),
    }
}

/// Events whose presence rows do not cover every (member, list) pair
pub fn audit(db: &Database) -> Result<Vec<AuditEntry>> {
    let ledger = PresenceLedger::new(db);
    let mut entries = Vec::new();

    for event in EventRegistry::new(db).list_all_events()? {
        let missing = ledger.missing_presences(event.id)?;
        if missing.is_empty() {
            continue;
        }

        tracing::warn!(event_id = %event.id, missing = missing.len(), "Presence rows missing");
        entries.push(AuditEntry {
            event_id: event.id,
            event_name: event.name,
            missing: missing
                .into_iter()
                .map(|(user_id, attendance_list_id)| MissingPresence {
                    user_id,
                    attendance_list_id,
                })
                .collect(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rollcall_core::{
        AttendanceList, AttendanceRepository, Corporation, DirectoryRepository, Event,
        EventRepository, Membership, MembershipRepository, Room, User, UserRepository, UserRole,
    };

    fn seeded() -> (Database, Event, User) {
        let db = Database::open_in_memory().unwrap();
        let corp = Corporation::new("Acme".into());
        db.create_corporation(&corp).unwrap();
        let room = Room::new("Hall A".into(), corp.id);
        db.create_room(&room).unwrap();
        let admin = User::new("ada@acme.test".into(), "Ada".into(), UserRole::Member);
        db.create_user(&admin).unwrap();
        let event = Event::new("Lecture".into(), "pw".into(), room.id, admin.id);
        db.create_event(&event).unwrap();
        (db, event, admin)
    }

    #[test]
    fn test_migrate_reports_version() {
        let db = Database::open_in_memory().unwrap();
        let out = run(&db, &Command::Migrate).unwrap();
        assert_eq!(out["schema_version"], 2);
    }

    #[test]
    fn test_events_and_lists_output() {
        let (db, event, _) = seeded();
        let now = Utc::now();
        db.create_attendance_list(&AttendanceList::new(
            event.id,
            "Week 1".into(),
            now,
            now + Duration::hours(1),
        ))
        .unwrap();

        let events = run(&db, &Command::Events).unwrap();
        assert_eq!(events[0]["name"], "Lecture");
        assert_eq!(events[0]["room"]["corporation"]["name"], "Acme");

        let lists = run(&db, &Command::Lists { event_id: event.id }).unwrap();
        assert_eq!(lists.as_array().unwrap().len(), 1);
        assert_eq!(lists[0]["name"], "Week 1");
    }

    #[test]
    fn test_audit_finds_gaps() {
        let (db, event, admin) = seeded();
        assert!(audit(&db).unwrap().is_empty());

        // Membership written without going through the registry
        db.add_member(&Membership::new(admin.id, event.id)).unwrap();
        let now = Utc::now();
        let list = AttendanceList::new(event.id, "Week 1".into(), now, now);
        db.create_attendance_list(&list).unwrap();

        let entries = audit(&db).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].missing.len(), 1);
        assert_eq!(entries[0].missing[0].attendance_list_id, list.id);
    }
}

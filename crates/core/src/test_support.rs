//! Shared fixtures for service tests

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::identity::Actor;
use crate::models::{Corporation, Event, Membership, Room, User, UserRole};
use crate::storage::{
    Database, DirectoryRepository, EventRepository, MembershipRepository, UserRepository,
};

/// Two corporations, three rooms and one user per role
pub(crate) struct World {
    pub db: Database,
    pub acme: Corporation,
    pub globex: Corporation,
    pub hall_a: Room,
    pub hall_b: Room,
    pub lab: Room,
    pub platform_admin: Actor,
    pub owner: Actor,
    pub rival_owner: Actor,
}

impl World {
    pub fn new() -> Self {
        let db = Database::open_in_memory().unwrap();

        let acme = Corporation::new("Acme".into());
        let globex = Corporation::new("Globex".into());
        db.create_corporation(&acme).unwrap();
        db.create_corporation(&globex).unwrap();

        let hall_a = Room::new("Hall A".into(), acme.id);
        let hall_b = Room::new("Hall B".into(), acme.id);
        let lab = Room::new("Lab".into(), globex.id);
        for room in [&hall_a, &hall_b, &lab] {
            db.create_room(room).unwrap();
        }

        let platform_admin = register(
            &db,
            User::new("root@platform.test".into(), "Root".into(), UserRole::PlatformAdmin),
        );
        let owner = register(
            &db,
            User::new("owner@acme.test".into(), "Olive".into(), UserRole::CorporationOwner)
                .with_corporation(acme.id),
        );
        let rival_owner = register(
            &db,
            User::new("owner@globex.test".into(), "Gus".into(), UserRole::CorporationOwner)
                .with_corporation(globex.id),
        );

        Self {
            db,
            acme,
            globex,
            hall_a,
            hall_b,
            lab,
            platform_admin,
            owner,
            rival_owner,
        }
    }

    /// Register a plain member
    pub fn member(&self, name: &str) -> Actor {
        register(
            &self.db,
            User::new(
                format!("{}@people.test", name.to_lowercase()),
                name.into(),
                UserRole::Member,
            ),
        )
    }

    /// Insert an event directly, bypassing the registry
    pub fn seed_event(
        &self,
        administrator: &Actor,
        name: &str,
        password: &str,
        room: &Room,
    ) -> Event {
        let event = Event::new(name.into(), password.into(), room.id, administrator.user_id);
        self.db.create_event(&event).unwrap();
        event
    }

    /// Insert a membership directly, bypassing presence materialization
    pub fn seed_member(&self, actor: &Actor, event: &Event) {
        self.db
            .add_member(&Membership::new(actor.user_id, event.id))
            .unwrap();
    }
}

fn register(db: &Database, user: User) -> Actor {
    db.create_user(&user).unwrap();
    Actor::from(&user)
}

/// A fixed Monday morning used as a time anchor
pub(crate) fn monday_nine() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

pub(crate) fn hours(n: i64) -> Duration {
    Duration::hours(n)
}

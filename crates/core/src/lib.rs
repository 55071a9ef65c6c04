//! Rollcall Core Library
//!
//! Events, attendance lists and presence tracking for multi-tenant
//! organizations: models, authorization, the services that keep the
//! presence ledger consistent, and SQLite storage.

pub mod config;
pub mod error;
pub mod identity;
pub mod invariants;
pub mod ledger;
mod lookup;
pub mod models;
pub mod permissions;
pub mod registry;
pub mod scheduler;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{Error, Result};
pub use identity::Actor;
pub use ledger::PresenceLedger;
pub use models::*;
pub use permissions::*;
pub use registry::EventRegistry;
pub use scheduler::AttendanceScheduler;
pub use storage::{
    AttendanceRepository, Database, DirectoryRepository, EventRepository, MembershipRepository,
    PresenceRepository, Storage, Transactional, UserRepository,
};

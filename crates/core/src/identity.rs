//! Caller identity
//!
//! Every core operation receives the authenticated caller explicitly as an
//! [`Actor`]; nothing is looked up from ambient state.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{User, UserRole};
use crate::storage::UserRepository;

/// The authenticated user performing an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
    pub corporations: BTreeSet<Uuid>,
}

impl Actor {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self {
            user_id,
            role,
            corporations: BTreeSet::new(),
        }
    }

    pub fn with_corporation(mut self, corporation_id: Uuid) -> Self {
        self.corporations.insert(corporation_id);
        self
    }

    /// Load the user behind `user_id` and build its identity
    pub fn resolve<S: UserRepository + ?Sized>(storage: &S, user_id: Uuid) -> Result<Self> {
        storage
            .find_user_by_id(user_id)?
            .map(|user| Actor::from(&user))
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))
    }

    pub fn is_platform_admin(&self) -> bool {
        self.role == UserRole::PlatformAdmin
    }

    /// Ownership only counts while the user holds the owner role
    pub fn owns(&self, corporation_id: Uuid) -> bool {
        self.role == UserRole::CorporationOwner && self.corporations.contains(&corporation_id)
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            corporations: user.corporations.clone(),
        }
    }
}

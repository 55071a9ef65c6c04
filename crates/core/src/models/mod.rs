//! Data models for Rollcall

mod attendance;
mod corporation;
mod event;
mod membership;
mod presence;
mod user;

pub use attendance::*;
pub use corporation::*;
pub use event::*;
pub use membership::*;
pub use presence::*;
pub use user::*;

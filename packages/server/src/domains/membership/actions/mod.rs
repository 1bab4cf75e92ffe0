//! Membership actions - every state change goes through the state machine
//! and runs in one transaction.

mod ban;
mod join;
mod queries;
mod transitions;

pub use ban::ban_member;
pub use join::join_community;
pub use queries::{count_contributors, list_members};
pub use transitions::{demote_member, promote_member};

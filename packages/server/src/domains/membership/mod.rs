//! Membership domain - learner / contributor / banned
//!
//! A user is in exactly one of three tables per community:
//! `community_learners`, `community_contributors` or `community_bans`.
//! Transitions are decided by [`machine`] and persisted by [`actions`].

pub mod actions;
pub mod machine;
pub mod models;

pub use machine::{MemberState, Transition, TransitionError};
pub use models::{CommunityBan, Member, MemberRole, Membership};

//! Communities domain - community records and the creator who owns them

pub mod actions;
pub mod models;

pub use models::{Community, CommunityOverview};

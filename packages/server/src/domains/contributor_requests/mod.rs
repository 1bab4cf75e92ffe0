//! Contributor requests domain - learners asking to become contributors

pub mod actions;
pub mod models;

pub use models::{ContributorRequest, ContributorRequestWithUser, RequestStatus};

// Business domains
pub mod communities;
pub mod contributor_requests;
pub mod dashboard;
pub mod membership;
pub mod posts;
pub mod reviews;
pub mod users;

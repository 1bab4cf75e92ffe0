//! Contributor request actions

mod create_request;
mod queries;
mod review_request;

pub use create_request::create_request;
pub use queries::list_requests;
pub use review_request::{approve_request, reject_request};

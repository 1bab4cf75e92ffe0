//! Community actions - business logic functions
//!
//! Actions take the request's `AppState` and the shared `ServerDeps`, enforce
//! authorization, and return API-ready results.

mod create_community;
mod queries;

pub use create_community::create_community;
pub use queries::{get_community, load_community};

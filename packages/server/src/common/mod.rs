// Common types and utilities shared across the application

pub mod app_state;
pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod id;

pub use app_state::AppState;
pub use auth::{Actor, AuthError, CommunityCapability, OwnedCommunity};
pub use entity_ids::*;
pub use error::{ApiError, ApiResult};

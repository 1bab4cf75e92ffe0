/// Authorization for community moderation
///
/// Provides a fluent API for creator-only checks in action code:
///
/// ```ignore
/// use crate::common::auth::{Actor, CommunityCapability};
///
/// Actor::new(visitor_id)
///     .can(CommunityCapability::BanMembers)
///     .check(&community)?;
/// ```
///
/// Authentication (who the visitor is) is resolved by the HTTP middleware;
/// this module only decides what an identified visitor may do.

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder, OwnedCommunity};
pub use capability::CommunityCapability;
pub use errors::AuthError;

use super::{AuthError, CommunityCapability};
use crate::common::entity_ids::UserId;

/// Entry point for authorization checks
///
/// Usage:
/// ```ignore
/// Actor::new(user_id)
///     .can(CommunityCapability::BanMembers)
///     .check(&community)?;
/// ```
pub struct Actor {
    actor_id: UserId,
}

impl Actor {
    pub fn new(actor_id: UserId) -> Self {
        Self { actor_id }
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: CommunityCapability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor_id: self.actor_id,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor_id: UserId,
    capability: CommunityCapability,
}

impl CapabilityBuilder {
    /// Perform the authorization check against the community's owner
    pub fn check<C>(self, community: &C) -> Result<(), AuthError>
    where
        C: OwnedCommunity,
    {
        if community.creator_id() == self.actor_id {
            return Ok(());
        }

        tracing::warn!(
            actor_id = %self.actor_id,
            capability = ?self.capability,
            "Permission denied: actor is not the community creator"
        );
        Err(AuthError::PermissionDenied(format!(
            "only the community creator can {}",
            self.capability.describe()
        )))
    }
}

/// Anything that knows who created it
pub trait OwnedCommunity {
    fn creator_id(&self) -> UserId;
}

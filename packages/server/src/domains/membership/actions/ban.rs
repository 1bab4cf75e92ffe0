//! Ban member action

use tracing::info;

use crate::common::{
    Actor, ApiError, ApiResult, AppState, CommunityCapability, CommunityId, UserId,
};
use crate::domains::communities::actions::load_community;
use crate::domains::dashboard::Mutation;
use crate::domains::membership::machine::Transition;
use crate::domains::membership::models::{CommunityBan, Membership};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Ban a user from a community. Creator only, irreversible.
///
/// Removal from both role tables and the ban record commit together or not
/// at all.
pub async fn ban_member(
    community_id: CommunityId,
    member_id: UserId,
    reason: &str,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<CommunityBan> {
    let actor_id = state.require_auth()?;
    let community = load_community(community_id, deps).await?;
    Actor::new(actor_id)
        .can(CommunityCapability::BanMembers)
        .check(&community)?;

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ApiError::validation("A reason is required to ban a member"));
    }
    if community.is_creator(member_id) {
        return Err(ApiError::validation("The community creator cannot be banned"));
    }
    if !User::exists(member_id, &deps.db_pool).await? {
        return Err(ApiError::NotFound("User"));
    }

    let mut tx = deps.db_pool.begin().await?;
    Membership::lock(community_id, member_id, &mut tx).await?;

    let current = Membership::find_state(community_id, member_id, &mut *tx).await?;
    Transition::Ban.apply(current)?;

    Membership::remove_contributor(community_id, member_id, &mut tx).await?;
    Membership::remove_learner(community_id, member_id, &mut tx).await?;
    let ban = CommunityBan::insert(community_id, member_id, reason, actor_id, &mut tx).await?;

    tx.commit().await?;

    deps.dashboard_cache
        .invalidate_for(Mutation::BanMember, community_id)
        .await;
    info!(
        community_id = %community_id,
        member_id = %member_id,
        previous_state = ?current,
        "Member banned"
    );

    Ok(ban)
}

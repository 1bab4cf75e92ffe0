//! Join community action

use tracing::info;

use crate::common::{ApiResult, AppState, CommunityId};
use crate::domains::communities::actions::load_community;
use crate::domains::dashboard::Mutation;
use crate::domains::membership::machine::{MemberState, Transition};
use crate::domains::membership::models::Membership;
use crate::kernel::ServerDeps;

/// Join a community as a learner.
///
/// Banned users are refused; existing members get a conflict.
pub async fn join_community(
    community_id: CommunityId,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<MemberState> {
    let user_id = state.require_auth()?;
    load_community(community_id, deps).await?;

    let mut tx = deps.db_pool.begin().await?;
    Membership::lock(community_id, user_id, &mut tx).await?;

    let current = Membership::find_state(community_id, user_id, &mut *tx).await?;
    let next = Transition::Join.apply(current)?;

    Membership::add_learner(community_id, user_id, &mut tx).await?;
    tx.commit().await?;

    deps.dashboard_cache
        .invalidate_for(Mutation::JoinCommunity, community_id)
        .await;
    info!(community_id = %community_id, user_id = %user_id, "Member joined as learner");

    Ok(next)
}

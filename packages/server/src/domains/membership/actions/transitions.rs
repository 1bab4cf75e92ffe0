//! Promote / demote actions (creator only)

use tracing::info;

use crate::common::{Actor, ApiResult, AppState, CommunityCapability, CommunityId, UserId};
use crate::domains::communities::actions::load_community;
use crate::domains::dashboard::Mutation;
use crate::domains::membership::machine::{MemberState, Transition};
use crate::domains::membership::models::Membership;
use crate::kernel::ServerDeps;

/// Move a learner into the contributor table.
pub async fn promote_member(
    community_id: CommunityId,
    member_id: UserId,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<MemberState> {
    change_role(Transition::Promote, community_id, member_id, state, deps).await
}

/// Move a contributor back into the learner table.
pub async fn demote_member(
    community_id: CommunityId,
    member_id: UserId,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<MemberState> {
    change_role(Transition::Demote, community_id, member_id, state, deps).await
}

async fn change_role(
    transition: Transition,
    community_id: CommunityId,
    member_id: UserId,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<MemberState> {
    let actor_id = state.require_auth()?;
    let community = load_community(community_id, deps).await?;
    Actor::new(actor_id)
        .can(CommunityCapability::ManageMembers)
        .check(&community)?;

    let mut tx = deps.db_pool.begin().await?;
    Membership::lock(community_id, member_id, &mut tx).await?;

    let current = Membership::find_state(community_id, member_id, &mut *tx).await?;
    let next = transition.apply(current)?;

    if next == MemberState::Contributor {
        Membership::remove_learner(community_id, member_id, &mut tx).await?;
        Membership::add_contributor(community_id, member_id, &mut tx).await?;
    } else {
        Membership::remove_contributor(community_id, member_id, &mut tx).await?;
        Membership::add_learner(community_id, member_id, &mut tx).await?;
    }

    tx.commit().await?;

    let mutation = match transition {
        Transition::Promote => Mutation::PromoteMember,
        _ => Mutation::DemoteMember,
    };
    deps.dashboard_cache.invalidate_for(mutation, community_id).await;

    info!(
        community_id = %community_id,
        member_id = %member_id,
        role = next.as_str(),
        "Member role changed"
    );
    Ok(next)
}

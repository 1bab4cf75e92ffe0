//! Approve / reject contributor request actions (creator only)

use sqlx::PgConnection;
use tracing::info;

use crate::common::{
    Actor, ApiError, ApiResult, AppState, CommunityCapability, CommunityId, ContributorRequestId,
};
use crate::domains::communities::actions::load_community;
use crate::domains::contributor_requests::models::{ContributorRequest, RequestStatus};
use crate::domains::dashboard::Mutation;
use crate::domains::membership::{Membership, Transition};
use crate::kernel::ServerDeps;

/// Approve a pending request and promote the requester in the same transaction.
pub async fn approve_request(
    community_id: CommunityId,
    request_id: ContributorRequestId,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<ContributorRequest> {
    authorize(community_id, state, deps).await?;

    let mut tx = deps.db_pool.begin().await?;
    let request = find_pending(community_id, request_id, &mut tx).await?;

    Membership::lock(community_id, request.user_id, &mut tx).await?;
    let current = Membership::find_state(community_id, request.user_id, &mut *tx).await?;
    Transition::Promote.apply(current)?;

    Membership::remove_learner(community_id, request.user_id, &mut tx).await?;
    Membership::add_contributor(community_id, request.user_id, &mut tx).await?;
    let request = ContributorRequest::mark_approved(request.id, &mut tx).await?;

    tx.commit().await?;

    deps.dashboard_cache
        .invalidate_for(Mutation::ApproveContributorRequest, community_id)
        .await;
    info!(
        community_id = %community_id,
        request_id = %request.id,
        user_id = %request.user_id,
        "Contributor request approved"
    );

    Ok(request)
}

/// Reject a pending request. The reason is shown to the requester.
pub async fn reject_request(
    community_id: CommunityId,
    request_id: ContributorRequestId,
    reason: &str,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<ContributorRequest> {
    authorize(community_id, state, deps).await?;

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ApiError::validation("A rejection reason is required"));
    }

    let mut tx = deps.db_pool.begin().await?;
    let request = find_pending(community_id, request_id, &mut tx).await?;
    let request = ContributorRequest::mark_rejected(request.id, reason, &mut tx).await?;
    tx.commit().await?;

    deps.dashboard_cache
        .invalidate_for(Mutation::RejectContributorRequest, community_id)
        .await;
    info!(
        community_id = %community_id,
        request_id = %request.id,
        user_id = %request.user_id,
        "Contributor request rejected"
    );

    Ok(request)
}

async fn authorize(community_id: CommunityId, state: &AppState, deps: &ServerDeps) -> ApiResult<()> {
    let actor_id = state.require_auth()?;
    let community = load_community(community_id, deps).await?;
    Actor::new(actor_id)
        .can(CommunityCapability::ReviewContributorRequests)
        .check(&community)?;
    Ok(())
}

async fn find_pending(
    community_id: CommunityId,
    request_id: ContributorRequestId,
    conn: &mut PgConnection,
) -> ApiResult<ContributorRequest> {
    let request = ContributorRequest::find_for_update(community_id, request_id, conn)
        .await?
        .ok_or(ApiError::NotFound("Contributor request"))?;

    if request.status != RequestStatus::Pending {
        return Err(ApiError::conflict("This request has already been processed"));
    }
    Ok(request)
}

//! Submit contributor request action

use tracing::info;

use crate::common::{ApiError, ApiResult, AppState, CommunityId};
use crate::domains::communities::actions::load_community;
use crate::domains::contributor_requests::models::ContributorRequest;
use crate::domains::dashboard::Mutation;
use crate::domains::membership::{MemberState, Membership};
use crate::kernel::ServerDeps;

/// A learner asks the creator to become a contributor.
pub async fn create_request(
    community_id: CommunityId,
    justification: &str,
    expertise_domain: Option<&str>,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<ContributorRequest> {
    let user_id = state.require_auth()?;
    load_community(community_id, deps).await?;

    match Membership::find_state(community_id, user_id, &deps.db_pool).await? {
        Some(MemberState::Learner) => {}
        Some(MemberState::Contributor) => {
            return Err(ApiError::conflict("You are already a contributor"));
        }
        Some(MemberState::Banned) | None => {
            return Err(ApiError::forbidden(
                "Only learners of this community can request to contribute",
            ));
        }
    }

    let justification = justification.trim();
    if justification.is_empty() {
        return Err(ApiError::validation("A justification is required"));
    }
    let expertise_domain = expertise_domain.map(str::trim).filter(|d| !d.is_empty());

    let request = ContributorRequest::create(
        community_id,
        user_id,
        justification,
        expertise_domain,
        &deps.db_pool,
    )
    .await?
    .ok_or_else(|| ApiError::conflict("You already have a pending contributor request"))?;

    deps.dashboard_cache
        .invalidate_for(Mutation::CreateContributorRequest, community_id)
        .await;
    info!(
        community_id = %community_id,
        request_id = %request.id,
        user_id = %user_id,
        "Contributor request submitted"
    );

    Ok(request)
}

//! Contributor request read actions

use crate::common::{Actor, ApiError, ApiResult, AppState, CommunityCapability, CommunityId};
use crate::domains::communities::actions::load_community;
use crate::domains::contributor_requests::models::ContributorRequest;
use crate::domains::dashboard::actions::cached_read;
use crate::domains::dashboard::{CacheKey, DashboardResource};
use crate::kernel::ServerDeps;

/// Requests of a community, newest first (creator only, cached).
pub async fn list_requests(
    community_id: CommunityId,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<serde_json::Value> {
    let visitor_id = state.require_auth()?;
    let community = load_community(community_id, deps).await?;
    Actor::new(visitor_id)
        .can(CommunityCapability::ReviewContributorRequests)
        .check(&community)?;

    let key = CacheKey::new(DashboardResource::ContributorRequests, community_id);
    cached_read(&deps.dashboard_cache, key, || async move {
        let requests = ContributorRequest::list_for_community(community_id, &deps.db_pool).await?;
        Ok::<_, ApiError>(requests)
    })
    .await
}

//! Membership read actions

use crate::common::{Actor, ApiError, ApiResult, AppState, CommunityCapability, CommunityId};
use crate::domains::communities::actions::load_community;
use crate::domains::dashboard::actions::cached_read;
use crate::domains::dashboard::{CacheKey, DashboardResource};
use crate::domains::membership::models::Membership;
use crate::kernel::ServerDeps;

/// Dashboard member list (creator only, cached).
pub async fn list_members(
    community_id: CommunityId,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<serde_json::Value> {
    let visitor_id = state.require_auth()?;
    let community = load_community(community_id, deps).await?;
    Actor::new(visitor_id)
        .can(CommunityCapability::ViewDashboard)
        .check(&community)?;

    let key = CacheKey::new(DashboardResource::Members, community_id);
    cached_read(&deps.dashboard_cache, key, || async move {
        let members = Membership::list(community_id, &deps.db_pool).await?;
        Ok::<_, ApiError>(members)
    })
    .await
}

/// Number of contributors, i.e. eligible voters on posts under review.
pub async fn count_contributors(community_id: CommunityId, deps: &ServerDeps) -> ApiResult<i64> {
    load_community(community_id, deps).await?;
    Ok(Membership::count_contributors(community_id, &deps.db_pool).await?)
}

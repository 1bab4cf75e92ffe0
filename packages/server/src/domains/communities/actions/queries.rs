//! Community read actions

use crate::common::{ApiError, ApiResult, CommunityId};
use crate::domains::communities::models::{Community, CommunityOverview};
use crate::kernel::ServerDeps;

/// Load a community or fail with 404. Every community-scoped action starts here.
pub async fn load_community(community_id: CommunityId, deps: &ServerDeps) -> ApiResult<Community> {
    Community::find_by_id(community_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("Community"))
}

/// Public community page: community plus member and post counts.
pub async fn get_community(
    community_id: CommunityId,
    deps: &ServerDeps,
) -> ApiResult<CommunityOverview> {
    Community::overview(community_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("Community"))
}

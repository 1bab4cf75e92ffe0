//! Post read actions

use crate::common::{ApiError, ApiResult, AppState, CommunityId};
use crate::domains::communities::actions::load_community;
use crate::domains::dashboard::actions::cached_read;
use crate::domains::dashboard::{CacheKey, DashboardResource};
use crate::domains::membership::{MemberState, Membership};
use crate::domains::posts::models::{Post, PostWithAuthor};
use crate::kernel::ServerDeps;

/// Posts of a community, newest first (cached).
pub async fn list_posts(community_id: CommunityId, deps: &ServerDeps) -> ApiResult<serde_json::Value> {
    load_community(community_id, deps).await?;

    let key = CacheKey::new(DashboardResource::Posts, community_id);
    cached_read(&deps.dashboard_cache, key, || async move {
        let posts = Post::list_for_community(community_id, &deps.db_pool).await?;
        Ok::<_, ApiError>(posts)
    })
    .await
}

/// Posts the visiting contributor still has to vote on, oldest first.
pub async fn review_queue(
    community_id: CommunityId,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<Vec<PostWithAuthor>> {
    let reviewer_id = state.require_auth()?;
    load_community(community_id, deps).await?;

    if Membership::find_state(community_id, reviewer_id, &deps.db_pool).await?
        != Some(MemberState::Contributor)
    {
        return Err(ApiError::forbidden("Only contributors can review posts"));
    }

    Ok(Post::pending_for_reviewer(community_id, reviewer_id, &deps.db_pool).await?)
}

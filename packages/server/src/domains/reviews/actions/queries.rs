//! Review read actions

use crate::common::{ApiError, ApiResult, CommunityId, PostId};
use crate::domains::communities::actions::load_community;
use crate::domains::membership::Membership;
use crate::domains::posts::models::Post;
use crate::domains::reviews::models::Review;
use crate::domains::reviews::tally::{ReviewTally, TallyView};
use crate::kernel::ServerDeps;

async fn load_post(community_id: CommunityId, post_id: PostId, deps: &ServerDeps) -> ApiResult<Post> {
    load_community(community_id, deps).await?;
    Post::find_in_community(community_id, post_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("Post"))
}

/// Votes cast on a post so far.
pub async fn review_count(
    community_id: CommunityId,
    post_id: PostId,
    deps: &ServerDeps,
) -> ApiResult<i64> {
    let post = load_post(community_id, post_id, deps).await?;
    Ok(Review::count_for_post(post.id, &deps.db_pool).await?)
}

/// Running tally of a post against the current contributor count.
pub async fn review_tally(
    community_id: CommunityId,
    post_id: PostId,
    deps: &ServerDeps,
) -> ApiResult<TallyView> {
    let post = load_post(community_id, post_id, deps).await?;

    let contributors = Membership::count_contributors(community_id, &deps.db_pool).await?;
    let decisions = Review::decisions_for_post(post.id, &deps.db_pool).await?;

    Ok(ReviewTally::from_decisions(contributors.max(0) as u64, decisions).view())
}

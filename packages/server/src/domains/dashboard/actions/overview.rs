//! Dashboard overview: the creator's headline numbers

use serde::Serialize;

use crate::common::{Actor, ApiError, ApiResult, AppState, CommunityCapability, CommunityId};
use crate::domains::communities::actions::load_community;
use crate::domains::contributor_requests::models::ContributorRequest;
use crate::domains::dashboard::actions::cached_read;
use crate::domains::dashboard::cache::{CacheKey, DashboardResource};
use crate::domains::membership::models::{CommunityBan, Membership};
use crate::domains::posts::models::{Post, PostStatus};
use crate::kernel::ServerDeps;

#[derive(Debug, Serialize)]
pub struct DashboardCommunity {
    pub id: CommunityId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_members: i64,
    pub learners: i64,
    pub contributors: i64,
    pub banned: i64,
    pub published_posts: i64,
    pub pending_posts: i64,
    pub rejected_posts: i64,
    pub pending_contributor_requests: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub community: DashboardCommunity,
    pub stats: DashboardStats,
}

/// Creator-only dashboard numbers, served from cache when fresh.
pub async fn dashboard_overview(
    community_id: CommunityId,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<serde_json::Value> {
    let visitor_id = state.require_auth()?;
    let community = load_community(community_id, deps).await?;
    Actor::new(visitor_id)
        .can(CommunityCapability::ViewDashboard)
        .check(&community)?;

    let key = CacheKey::new(DashboardResource::Dashboard, community_id);
    let pool = &deps.db_pool;

    cached_read(&deps.dashboard_cache, key, || async move {
        let learners = Membership::count_learners(community_id, pool).await?;
        let contributors = Membership::count_contributors(community_id, pool).await?;
        let banned = CommunityBan::count(community_id, pool).await?;

        let stats = DashboardStats {
            total_members: learners + contributors,
            learners,
            contributors,
            banned,
            published_posts: Post::count_by_status(community_id, PostStatus::Published, pool)
                .await?,
            pending_posts: Post::count_by_status(community_id, PostStatus::PendingReview, pool)
                .await?,
            rejected_posts: Post::count_by_status(community_id, PostStatus::Rejected, pool)
                .await?,
            pending_contributor_requests: ContributorRequest::count_pending(community_id, pool)
                .await?,
        };

        Ok::<_, ApiError>(DashboardOverview {
            community: DashboardCommunity {
                id: community.id,
                name: community.name,
                description: community.description,
            },
            stats,
        })
    })
    .await
}

//! Submit review action
//!
//! Records one contributor vote and, under the same row lock on the post,
//! lets the finalization policy publish or reject it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::common::{ApiError, ApiResult, AppState, CommunityId, PostId};
use crate::domains::communities::actions::load_community;
use crate::domains::dashboard::Mutation;
use crate::domains::membership::{MemberState, Membership};
use crate::domains::posts::models::{Post, PostStatus};
use crate::domains::reviews::models::{Review, ReviewDecision};
use crate::domains::reviews::tally::{ReviewTally, TallyView};
use crate::kernel::ServerDeps;

/// Vote body: `status` is the decision, `content` the written feedback.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub content: String,
    pub status: ReviewDecision,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmittedReview {
    pub review: Review,
    pub tally: TallyView,
    pub post_status: PostStatus,
}

pub async fn submit_review(
    community_id: CommunityId,
    post_id: PostId,
    input: ReviewInput,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<SubmittedReview> {
    let reviewer_id = state.require_auth()?;
    load_community(community_id, deps).await?;

    let feedback = input.content.trim();
    if feedback.is_empty() {
        return Err(ApiError::validation("Review feedback is required"));
    }

    let mut tx = deps.db_pool.begin().await?;

    let post = Post::find_for_update(community_id, post_id, &mut *tx)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    if Membership::find_state(community_id, reviewer_id, &mut *tx).await?
        != Some(MemberState::Contributor)
    {
        return Err(ApiError::forbidden("Only contributors can review posts"));
    }
    if post.author_id == reviewer_id {
        return Err(ApiError::forbidden("You cannot review your own post"));
    }
    if !post.status.is_under_review() {
        return Err(ApiError::conflict("This post is no longer under review"));
    }

    let review = Review::insert(post_id, reviewer_id, input.status, feedback, &mut *tx)
        .await?
        .ok_or_else(|| ApiError::conflict("You have already reviewed this post"))?;

    let contributors = Membership::count_contributors(community_id, &mut *tx).await?;
    let decisions = Review::decisions_for_post(post_id, &mut *tx).await?;
    let tally = ReviewTally::from_decisions(contributors.max(0) as u64, decisions);

    // The author cannot vote, so they do not count toward the majority.
    let eligible = if Membership::find_state(community_id, post.author_id, &mut *tx).await?
        == Some(MemberState::Contributor)
    {
        tally.excluding_author()
    } else {
        tally
    };

    let post_status = match deps.review_policy.decide(&eligible) {
        Some(status) => Post::update_status(post_id, status, &mut *tx).await?.status,
        None => post.status,
    };

    tx.commit().await?;

    deps.dashboard_cache
        .invalidate_for(Mutation::SubmitReview, community_id)
        .await;

    if tally.is_crucial_vote() {
        debug!(post_id = %post_id, votes = tally.votes, "Crucial vote recorded");
    }
    info!(
        community_id = %community_id,
        post_id = %post_id,
        reviewer_id = %reviewer_id,
        decision = ?review.decision,
        post_status = ?post_status,
        "Review submitted"
    );

    Ok(SubmittedReview {
        review,
        tally: tally.view(),
        post_status,
    })
}

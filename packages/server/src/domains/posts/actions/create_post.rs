//! Post creation action

use tracing::info;

use crate::common::{ApiError, ApiResult, AppState, CommunityId};
use crate::domains::communities::actions::load_community;
use crate::domains::dashboard::Mutation;
use crate::domains::membership::{MemberState, Membership};
use crate::domains::posts::models::{CreatePost, Post, PostStatus};
use crate::kernel::ServerDeps;

/// Input for [`create_post`]
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub accept_contributions: bool,
}

/// Create a post in a community.
///
/// The creator publishes directly. Contributors' posts go to review.
/// Learners and outsiders cannot post.
pub async fn create_post(
    community_id: CommunityId,
    input: NewPost,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<Post> {
    let author_id = state.require_auth()?;
    let community = load_community(community_id, deps).await?;

    let status = if community.is_creator(author_id) {
        PostStatus::Published
    } else {
        match Membership::find_state(community_id, author_id, &deps.db_pool).await? {
            Some(MemberState::Contributor) => PostStatus::PendingReview,
            _ => {
                return Err(ApiError::forbidden(
                    "Only contributors and the creator can publish posts",
                ))
            }
        }
    };

    let title = input.title.trim();
    let content = input.content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(ApiError::validation("Title and content are required"));
    }

    let post = Post::create(
        CreatePost::builder()
            .community_id(community_id)
            .author_id(author_id)
            .title(title)
            .content(content)
            .status(status)
            .accept_contributions(input.accept_contributions)
            .build(),
        &deps.db_pool,
    )
    .await?;

    deps.dashboard_cache
        .invalidate_for(Mutation::CreatePost, community_id)
        .await;
    info!(
        community_id = %community_id,
        post_id = %post.id,
        status = ?post.status,
        "Post created"
    );

    Ok(post)
}

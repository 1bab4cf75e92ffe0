use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use typed_builder::TypedBuilder;

use crate::common::{CommunityId, PostId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "post_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// Waiting for contributor votes
    PendingReview,
    Published,
    Rejected,
}

impl PostStatus {
    pub fn is_under_review(&self) -> bool {
        matches!(self, PostStatus::PendingReview)
    }
}

/// Post model - SQL persistence layer
///
/// Content is the editor's HTML, stored verbatim.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Post {
    pub id: PostId,
    pub community_id: CommunityId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub accept_contributions: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post joined with its author's display fields (listing view)
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    pub id: PostId,
    pub community_id: CommunityId,
    pub author_id: UserId,
    pub author_name: String,
    pub author_user_name: String,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub accept_contributions: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a post
#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct CreatePost {
    pub community_id: CommunityId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    #[builder(default = PostStatus::PendingReview)]
    pub status: PostStatus,
    #[builder(default = false)]
    pub accept_contributions: bool,
}

impl Post {
    pub async fn create(input: CreatePost, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO community_posts
                (community_id, author_id, title, content, status, accept_contributions)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(input.community_id)
        .bind(input.author_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.status)
        .bind(input.accept_contributions)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find a post, scoped to its community
    pub async fn find_in_community(
        community_id: CommunityId,
        post_id: PostId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM community_posts WHERE id = $1 AND community_id = $2",
        )
        .bind(post_id)
        .bind(community_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Find a post and lock its row until the transaction ends.
    ///
    /// Votes on the same post serialize on this lock, so finalization sees
    /// every committed vote exactly once.
    pub async fn find_for_update<'e, E>(
        community_id: CommunityId,
        post_id: PostId,
        executor: E,
    ) -> Result<Option<Self>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM community_posts WHERE id = $1 AND community_id = $2 FOR UPDATE",
        )
        .bind(post_id)
        .bind(community_id)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn update_status<'e, E>(id: PostId, status: PostStatus, executor: E) -> Result<Self>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>(
            "UPDATE community_posts SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Posts of a community with author display fields, newest first
    pub async fn list_for_community(
        community_id: CommunityId,
        pool: &PgPool,
    ) -> Result<Vec<PostWithAuthor>> {
        sqlx::query_as::<_, PostWithAuthor>(
            "SELECT p.id, p.community_id, p.author_id,
                    u.full_name AS author_name, u.user_name AS author_user_name,
                    p.title, p.content, p.status, p.accept_contributions, p.created_at
             FROM community_posts p
             JOIN users u ON u.id = p.author_id
             WHERE p.community_id = $1
             ORDER BY p.created_at DESC",
        )
        .bind(community_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Posts waiting for `reviewer`'s vote: under review, not theirs, not yet voted on
    pub async fn pending_for_reviewer(
        community_id: CommunityId,
        reviewer_id: UserId,
        pool: &PgPool,
    ) -> Result<Vec<PostWithAuthor>> {
        sqlx::query_as::<_, PostWithAuthor>(
            "SELECT p.id, p.community_id, p.author_id,
                    u.full_name AS author_name, u.user_name AS author_user_name,
                    p.title, p.content, p.status, p.accept_contributions, p.created_at
             FROM community_posts p
             JOIN users u ON u.id = p.author_id
             WHERE p.community_id = $1
               AND p.status = 'pending_review'
               AND p.author_id <> $2
               AND NOT EXISTS (
                   SELECT 1 FROM post_reviews r
                   WHERE r.post_id = p.id AND r.contributor_id = $2
               )
             ORDER BY p.created_at ASC",
        )
        .bind(community_id)
        .bind(reviewer_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Count posts of a community by status
    pub async fn count_by_status(
        community_id: CommunityId,
        status: PostStatus,
        pool: &PgPool,
    ) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM community_posts WHERE community_id = $1 AND status = $2",
        )
        .bind(community_id)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&PostStatus::PendingReview).unwrap(),
            "\"pending_review\""
        );
    }

    #[test]
    fn only_pending_posts_are_under_review() {
        assert!(PostStatus::PendingReview.is_under_review());
        assert!(!PostStatus::Published.is_under_review());
        assert!(!PostStatus::Rejected.is_under_review());
    }
}

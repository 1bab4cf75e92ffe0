//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use community_core::common::{CommunityId, PostId, UserId};
use community_core::domains::communities::Community;
use community_core::domains::membership::Membership;
use community_core::domains::posts::models::{CreatePost, Post, PostStatus};
use community_core::domains::users::User;
use sqlx::PgPool;

/// Create a user the way the session provider would mirror one
pub async fn create_user(pool: &PgPool, full_name: &str) -> Result<UserId> {
    let id = UserId::new();
    // Unique across the shared database
    let user_name = format!("{}-{}", full_name.to_lowercase().replace(' ', "-"), id);
    User::upsert(id, full_name, &user_name, pool).await?;
    Ok(id)
}

pub async fn add_learner(pool: &PgPool, community_id: CommunityId, user_id: UserId) -> Result<()> {
    let mut conn = pool.acquire().await?;
    Membership::add_learner(community_id, user_id, &mut conn).await
}

pub async fn add_contributor(
    pool: &PgPool,
    community_id: CommunityId,
    user_id: UserId,
) -> Result<()> {
    let mut conn = pool.acquire().await?;
    Membership::add_contributor(community_id, user_id, &mut conn).await
}

/// A community with a creator, some learners and some contributors
pub struct SeededCommunity {
    pub id: CommunityId,
    pub creator: UserId,
    pub learners: Vec<UserId>,
    pub contributors: Vec<UserId>,
}

impl SeededCommunity {
    pub fn path(&self, suffix: &str) -> String {
        format!("/communities/{}{}", self.id, suffix)
    }
}

pub async fn seed_community(
    pool: &PgPool,
    learners: usize,
    contributors: usize,
) -> Result<SeededCommunity> {
    let creator = create_user(pool, "Creator").await?;
    let community = Community::create("Rust Learners", "Test community", creator, pool).await?;

    let mut seeded = SeededCommunity {
        id: community.id,
        creator,
        learners: Vec::with_capacity(learners),
        contributors: Vec::with_capacity(contributors),
    };

    for i in 0..learners {
        let user = create_user(pool, &format!("Learner {}", i)).await?;
        add_learner(pool, community.id, user).await?;
        seeded.learners.push(user);
    }
    for i in 0..contributors {
        let user = create_user(pool, &format!("Contributor {}", i)).await?;
        add_contributor(pool, community.id, user).await?;
        seeded.contributors.push(user);
    }

    Ok(seeded)
}

/// Create a post straight in the database with the given status
pub async fn create_post(
    pool: &PgPool,
    community_id: CommunityId,
    author_id: UserId,
    status: PostStatus,
) -> Result<PostId> {
    let post = Post::create(
        CreatePost::builder()
            .community_id(community_id)
            .author_id(author_id)
            .title("Ownership in practice")
            .content("<p>Borrowing rules explained.</p>")
            .status(status)
            .build(),
        pool,
    )
    .await?;
    Ok(post.id)
}

/// Which role tables and ban table hold `user_id` in a community
pub async fn membership_rows(
    pool: &PgPool,
    community_id: CommunityId,
    user_id: UserId,
) -> Result<(bool, bool, bool)> {
    let row = sqlx::query_as::<_, (bool, bool, bool)>(
        "SELECT
            EXISTS (SELECT 1 FROM community_learners
                    WHERE community_id = $1 AND learner_id = $2),
            EXISTS (SELECT 1 FROM community_contributors
                    WHERE community_id = $1 AND contributor_id = $2),
            EXISTS (SELECT 1 FROM community_bans
                    WHERE community_id = $1 AND user_id = $2)",
    )
    .bind(community_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{CommunityId, OwnedCommunity, UserId};

/// Community model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub description: String,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Community with membership and content counts (public page)
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct CommunityOverview {
    pub id: CommunityId,
    pub name: String,
    pub description: String,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
    pub learner_count: i64,
    pub contributor_count: i64,
    pub published_post_count: i64,
}

impl Community {
    pub async fn create(
        name: &str,
        description: &str,
        creator_id: UserId,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO communities (name, description, creator_id)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(creator_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: CommunityId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM communities WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn overview(id: CommunityId, pool: &PgPool) -> Result<Option<CommunityOverview>> {
        sqlx::query_as::<_, CommunityOverview>(
            "SELECT c.id, c.name, c.description, c.creator_id, c.created_at,
                    (SELECT COUNT(*) FROM community_learners l WHERE l.community_id = c.id)
                        AS learner_count,
                    (SELECT COUNT(*) FROM community_contributors cc WHERE cc.community_id = c.id)
                        AS contributor_count,
                    (SELECT COUNT(*) FROM community_posts p
                      WHERE p.community_id = c.id AND p.status = 'published')
                        AS published_post_count
             FROM communities c
             WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub fn is_creator(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }
}

impl OwnedCommunity for Community {
    fn creator_id(&self) -> UserId {
        self.creator_id
    }
}

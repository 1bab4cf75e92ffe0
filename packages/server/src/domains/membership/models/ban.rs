use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::common::{CommunityId, UserId};

/// Ban record. Its presence is what makes a user `banned` in a community.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct CommunityBan {
    pub community_id: CommunityId,
    pub user_id: UserId,
    pub reason: String,
    pub banned_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl CommunityBan {
    pub async fn insert(
        community_id: CommunityId,
        user_id: UserId,
        reason: &str,
        banned_by: UserId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO community_bans (community_id, user_id, reason, banned_by)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(community_id)
        .bind(user_id)
        .bind(reason)
        .bind(banned_by)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find(
        community_id: CommunityId,
        user_id: UserId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM community_bans WHERE community_id = $1 AND user_id = $2",
        )
        .bind(community_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count(community_id: CommunityId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM community_bans WHERE community_id = $1")
            .bind(community_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::UserId;

/// Display fields of an account owned by the session provider
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Mirror an account from the session provider
    pub async fn upsert(id: UserId, full_name: &str, user_name: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (id, full_name, user_name)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE
                SET full_name = EXCLUDED.full_name, user_name = EXCLUDED.user_name
             RETURNING *",
        )
        .bind(id)
        .bind(full_name)
        .bind(user_name)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn exists(id: UserId, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}

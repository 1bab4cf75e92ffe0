use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{PostId, ReviewId, UserId};

// ============================================================================
// Enums
// ============================================================================

/// A contributor's vote on a post.
///
/// Accepts the upper-case spelling older clients send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "review_decision", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    #[serde(alias = "APPROVED")]
    Approved,
    #[serde(alias = "REJECTED")]
    Rejected,
}

// ============================================================================
// Review Model
// ============================================================================

/// One contributor's vote on one post. Unique per (post, contributor).
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub post_id: PostId,
    pub contributor_id: UserId,
    pub decision: ReviewDecision,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Record a vote. Returns `None` if this contributor already voted on the post.
    pub async fn insert<'e, E>(
        post_id: PostId,
        contributor_id: UserId,
        decision: ReviewDecision,
        feedback: &str,
        executor: E,
    ) -> Result<Option<Self>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>(
            "INSERT INTO post_reviews (post_id, contributor_id, decision, feedback)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (post_id, contributor_id) DO NOTHING
             RETURNING *",
        )
        .bind(post_id)
        .bind(contributor_id)
        .bind(decision)
        .bind(feedback)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    /// All reviews of a post, oldest first
    pub async fn find_by_post(post_id: PostId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM post_reviews WHERE post_id = $1 ORDER BY created_at ASC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Decisions cast on a post (input to the tally)
    pub async fn decisions_for_post<'e, E>(post_id: PostId, executor: E) -> Result<Vec<ReviewDecision>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, ReviewDecision>(
            "SELECT decision FROM post_reviews WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    /// Number of votes cast on a post
    pub async fn count_for_post(post_id: PostId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_reviews WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_accepts_both_spellings() {
        let lower: ReviewDecision = serde_json::from_str("\"approved\"").unwrap();
        let upper: ReviewDecision = serde_json::from_str("\"REJECTED\"").unwrap();
        assert_eq!(lower, ReviewDecision::Approved);
        assert_eq!(upper, ReviewDecision::Rejected);
    }

    #[test]
    fn decision_rejects_unknown_values() {
        assert!(serde_json::from_str::<ReviewDecision>("\"maybe\"").is_err());
    }
}

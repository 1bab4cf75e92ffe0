use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{CommunityId, ContributorRequestId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A learner's request to become a contributor
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct ContributorRequest {
    pub id: ContributorRequestId,
    pub community_id: CommunityId,
    pub user_id: UserId,
    pub justification: String,
    pub expertise_domain: Option<String>,
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request joined with the requester's display fields (dashboard view)
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct ContributorRequestWithUser {
    pub id: ContributorRequestId,
    pub user_id: UserId,
    pub user_name: String,
    pub full_name: String,
    pub justification: String,
    pub expertise_domain: Option<String>,
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ContributorRequest {
    /// Open a request. Returns `None` if the user already has a pending one.
    pub async fn create(
        community_id: CommunityId,
        user_id: UserId,
        justification: &str,
        expertise_domain: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO contributor_requests (community_id, user_id, justification, expertise_domain)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (community_id, user_id) WHERE status = 'pending' DO NOTHING
             RETURNING *",
        )
        .bind(community_id)
        .bind(user_id)
        .bind(justification)
        .bind(expertise_domain)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Find a request of a community and lock it until the transaction ends
    pub async fn find_for_update(
        community_id: CommunityId,
        id: ContributorRequestId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM contributor_requests
             WHERE id = $1 AND community_id = $2
             FOR UPDATE",
        )
        .bind(id)
        .bind(community_id)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn mark_approved(id: ContributorRequestId, conn: &mut PgConnection) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE contributor_requests
             SET status = 'approved', updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn mark_rejected(
        id: ContributorRequestId,
        reason: &str,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE contributor_requests
             SET status = 'rejected', rejection_reason = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(reason)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// Requests of a community with requester display fields, newest first
    pub async fn list_for_community(
        community_id: CommunityId,
        pool: &PgPool,
    ) -> Result<Vec<ContributorRequestWithUser>> {
        sqlx::query_as::<_, ContributorRequestWithUser>(
            "SELECT r.id, r.user_id, u.user_name, u.full_name, r.justification,
                    r.expertise_domain, r.status, r.rejection_reason, r.created_at
             FROM contributor_requests r
             JOIN users u ON u.id = r.user_id
             WHERE r.community_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(community_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_pending(community_id: CommunityId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contributor_requests
             WHERE community_id = $1 AND status = 'pending'",
        )
        .bind(community_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

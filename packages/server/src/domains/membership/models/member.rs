use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::common::{CommunityId, UserId};
use crate::domains::membership::machine::MemberState;

/// Role of an active (not banned) member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Learner,
    Contributor,
}

impl TryFrom<String> for MemberRole {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        match value.as_str() {
            "learner" => Ok(MemberRole::Learner),
            "contributor" => Ok(MemberRole::Contributor),
            other => Err(anyhow!("unknown member role: {}", other)),
        }
    }
}

impl From<MemberRole> for MemberState {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Learner => MemberState::Learner,
            MemberRole::Contributor => MemberState::Contributor,
        }
    }
}

/// A member as shown on the dashboard.
///
/// Rows come from two role tables (`community_learners`,
/// `community_contributors`); the role says which one.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Member {
    pub id: UserId,
    pub community_id: CommunityId,
    #[sqlx(try_from = "String")]
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    pub full_name: String,
    pub user_name: String,
}

/// Membership persistence: the three tables a member can live in.
pub struct Membership;

impl Membership {
    /// Current state of `user_id` in a community; `None` if not a member.
    pub async fn find_state<'e, E>(
        community_id: CommunityId,
        user_id: UserId,
        executor: E,
    ) -> Result<Option<MemberState>>
    where
        E: PgExecutor<'e>,
    {
        let state = sqlx::query_scalar::<_, Option<String>>(
            "SELECT CASE
                WHEN EXISTS (SELECT 1 FROM community_bans
                             WHERE community_id = $1 AND user_id = $2) THEN 'banned'
                WHEN EXISTS (SELECT 1 FROM community_contributors
                             WHERE community_id = $1 AND contributor_id = $2) THEN 'contributor'
                WHEN EXISTS (SELECT 1 FROM community_learners
                             WHERE community_id = $1 AND learner_id = $2) THEN 'learner'
             END",
        )
        .bind(community_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(state.as_deref().and_then(MemberState::parse))
    }

    /// Learners and contributors with display fields, newest first
    pub async fn list(community_id: CommunityId, pool: &PgPool) -> Result<Vec<Member>> {
        sqlx::query_as::<_, Member>(
            "SELECT m.id, m.community_id, m.role, m.joined_at, u.full_name, u.user_name
             FROM (
                 SELECT learner_id AS id, community_id, 'learner' AS role, joined_at
                 FROM community_learners WHERE community_id = $1
                 UNION ALL
                 SELECT contributor_id AS id, community_id, 'contributor' AS role, joined_at
                 FROM community_contributors WHERE community_id = $1
             ) m
             JOIN users u ON u.id = m.id
             ORDER BY m.joined_at DESC",
        )
        .bind(community_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_contributors<'e, E>(community_id: CommunityId, executor: E) -> Result<i64>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM community_contributors WHERE community_id = $1",
        )
        .bind(community_id)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn count_learners(community_id: CommunityId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM community_learners WHERE community_id = $1",
        )
        .bind(community_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn add_learner(
        community_id: CommunityId,
        user_id: UserId,
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query("INSERT INTO community_learners (community_id, learner_id) VALUES ($1, $2)")
            .bind(community_id)
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn add_contributor(
        community_id: CommunityId,
        user_id: UserId,
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO community_contributors (community_id, contributor_id) VALUES ($1, $2)",
        )
        .bind(community_id)
        .bind(user_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Returns the number of rows removed (0 or 1)
    pub async fn remove_learner(
        community_id: CommunityId,
        user_id: UserId,
        conn: &mut PgConnection,
    ) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM community_learners WHERE community_id = $1 AND learner_id = $2",
        )
        .bind(community_id)
        .bind(user_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Returns the number of rows removed (0 or 1)
    pub async fn remove_contributor(
        community_id: CommunityId,
        user_id: UserId,
        conn: &mut PgConnection,
    ) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM community_contributors WHERE community_id = $1 AND contributor_id = $2",
        )
        .bind(community_id)
        .bind(user_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Lock the (community, user) pair for the rest of the transaction.
    ///
    /// Two concurrent transitions for the same member would otherwise both
    /// read the old state and both write.
    pub async fn lock(
        community_id: CommunityId,
        user_id: UserId,
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1 || ':' || $2, 0))")
            .bind(community_id.to_string())
            .bind(user_id.to_string())
            .execute(conn)
            .await?;
        Ok(())
    }
}

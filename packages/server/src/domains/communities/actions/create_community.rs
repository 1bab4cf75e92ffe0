//! Create community action

use tracing::info;

use crate::common::{ApiError, ApiResult, AppState};
use crate::domains::communities::models::Community;
use crate::kernel::ServerDeps;

/// Create a community owned by the visitor.
pub async fn create_community(
    name: &str,
    description: &str,
    state: &AppState,
    deps: &ServerDeps,
) -> ApiResult<Community> {
    let creator_id = state.require_auth()?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Community name is required"));
    }

    let community = Community::create(name, description.trim(), creator_id, &deps.db_pool).await?;
    info!(community_id = %community.id, creator_id = %creator_id, "Community created");

    Ok(community)
}

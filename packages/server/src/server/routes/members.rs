use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{ApiResult, AppState, CommunityId, UserId};
use crate::domains::membership::actions;
use crate::server::app::AxumAppState;
use crate::server::routes::MessageResponse;

#[derive(Deserialize)]
pub struct BanBody {
    #[serde(default)]
    pub reason: String,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: i64,
}

pub async fn list_members(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path(community_id): Path<CommunityId>,
) -> ApiResult<Json<serde_json::Value>> {
    Ok(Json(actions::list_members(community_id, &visitor, &state.deps).await?))
}

pub async fn promote(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path((community_id, member_id)): Path<(CommunityId, UserId)>,
) -> ApiResult<Json<MessageResponse>> {
    actions::promote_member(community_id, member_id, &visitor, &state.deps).await?;
    Ok(MessageResponse::json("Member promoted to contributor"))
}

pub async fn demote(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path((community_id, member_id)): Path<(CommunityId, UserId)>,
) -> ApiResult<Json<MessageResponse>> {
    actions::demote_member(community_id, member_id, &visitor, &state.deps).await?;
    Ok(MessageResponse::json("Member demoted to learner"))
}

pub async fn ban(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path((community_id, member_id)): Path<(CommunityId, UserId)>,
    Json(body): Json<BanBody>,
) -> ApiResult<Json<MessageResponse>> {
    actions::ban_member(community_id, member_id, &body.reason, &visitor, &state.deps).await?;
    Ok(MessageResponse::json("Member banned successfully"))
}

pub async fn count_contributors(
    Extension(state): Extension<AxumAppState>,
    Path(community_id): Path<CommunityId>,
) -> ApiResult<Json<CountResponse>> {
    let count = actions::count_contributors(community_id, &state.deps).await?;
    Ok(Json(CountResponse { count }))
}

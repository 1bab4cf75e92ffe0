use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::{ApiResult, AppState, CommunityId};
use crate::domains::communities::actions;
use crate::domains::communities::{Community, CommunityOverview};
use crate::domains::membership::actions::join_community;
use crate::server::app::AxumAppState;
use crate::server::routes::MessageResponse;

#[derive(Deserialize)]
pub struct CreateCommunityBody {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub async fn create_community(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Json(body): Json<CreateCommunityBody>,
) -> ApiResult<(StatusCode, Json<Community>)> {
    let community =
        actions::create_community(&body.name, &body.description, &visitor, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(community)))
}

pub async fn get_community(
    Extension(state): Extension<AxumAppState>,
    Path(community_id): Path<CommunityId>,
) -> ApiResult<Json<CommunityOverview>> {
    Ok(Json(actions::get_community(community_id, &state.deps).await?))
}

pub async fn join(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path(community_id): Path<CommunityId>,
) -> ApiResult<Json<MessageResponse>> {
    join_community(community_id, &visitor, &state.deps).await?;
    Ok(MessageResponse::json("Joined community successfully"))
}

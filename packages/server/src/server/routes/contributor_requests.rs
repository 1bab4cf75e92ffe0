use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::{ApiResult, AppState, CommunityId, ContributorRequestId};
use crate::domains::contributor_requests::actions;
use crate::domains::contributor_requests::ContributorRequest;
use crate::server::app::AxumAppState;
use crate::server::routes::MessageResponse;

#[derive(Deserialize)]
pub struct CreateRequestBody {
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub expertise_domain: Option<String>,
}

#[derive(Deserialize)]
pub struct RejectBody {
    #[serde(default)]
    pub reason: String,
}

pub async fn list_requests(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path(community_id): Path<CommunityId>,
) -> ApiResult<Json<serde_json::Value>> {
    Ok(Json(actions::list_requests(community_id, &visitor, &state.deps).await?))
}

pub async fn create_request(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path(community_id): Path<CommunityId>,
    Json(body): Json<CreateRequestBody>,
) -> ApiResult<(StatusCode, Json<ContributorRequest>)> {
    let request = actions::create_request(
        community_id,
        &body.justification,
        body.expertise_domain.as_deref(),
        &visitor,
        &state.deps,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn approve(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path((community_id, request_id)): Path<(CommunityId, ContributorRequestId)>,
) -> ApiResult<Json<MessageResponse>> {
    actions::approve_request(community_id, request_id, &visitor, &state.deps).await?;
    Ok(MessageResponse::json("Request approved, member promoted to contributor"))
}

pub async fn reject(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path((community_id, request_id)): Path<(CommunityId, ContributorRequestId)>,
    Json(body): Json<RejectBody>,
) -> ApiResult<Json<MessageResponse>> {
    actions::reject_request(community_id, request_id, &body.reason, &visitor, &state.deps).await?;
    Ok(MessageResponse::json("Request rejected"))
}

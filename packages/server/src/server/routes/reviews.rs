use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::common::{ApiResult, AppState, CommunityId, PostId};
use crate::domains::reviews::actions::{self, ReviewInput, SubmittedReview};
use crate::domains::reviews::TallyView;
use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct ReviewCountResponse {
    pub count: i64,
}

pub async fn submit_review(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path((community_id, post_id)): Path<(CommunityId, PostId)>,
    Json(body): Json<ReviewInput>,
) -> ApiResult<(StatusCode, Json<SubmittedReview>)> {
    let submitted = actions::submit_review(community_id, post_id, body, &visitor, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(submitted)))
}

pub async fn review_count(
    Extension(state): Extension<AxumAppState>,
    Path((community_id, post_id)): Path<(CommunityId, PostId)>,
) -> ApiResult<Json<ReviewCountResponse>> {
    let count = actions::review_count(community_id, post_id, &state.deps).await?;
    Ok(Json(ReviewCountResponse { count }))
}

pub async fn review_tally(
    Extension(state): Extension<AxumAppState>,
    Path((community_id, post_id)): Path<(CommunityId, PostId)>,
) -> ApiResult<Json<TallyView>> {
    Ok(Json(actions::review_tally(community_id, post_id, &state.deps).await?))
}

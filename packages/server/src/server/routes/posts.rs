use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};

use crate::common::{ApiResult, AppState, CommunityId};
use crate::domains::posts::actions::{self, NewPost};
use crate::domains::posts::{Post, PostWithAuthor};
use crate::server::app::AxumAppState;

pub async fn list_posts(
    Extension(state): Extension<AxumAppState>,
    Path(community_id): Path<CommunityId>,
) -> ApiResult<Json<serde_json::Value>> {
    Ok(Json(actions::list_posts(community_id, &state.deps).await?))
}

pub async fn create_post(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path(community_id): Path<CommunityId>,
    Json(body): Json<NewPost>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = actions::create_post(community_id, body, &visitor, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn review_queue(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path(community_id): Path<CommunityId>,
) -> ApiResult<Json<Vec<PostWithAuthor>>> {
    Ok(Json(actions::review_queue(community_id, &visitor, &state.deps).await?))
}

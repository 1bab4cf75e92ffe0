use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{ApiResult, AppState, CommunityId};
use crate::domains::dashboard::actions::dashboard_overview;
use crate::server::app::AxumAppState;

pub async fn dashboard(
    Extension(state): Extension<AxumAppState>,
    visitor: AppState,
    Path(community_id): Path<CommunityId>,
) -> ApiResult<Json<serde_json::Value>> {
    Ok(Json(dashboard_overview(community_id, &visitor, &state.deps).await?))
}

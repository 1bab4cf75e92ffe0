// HTTP routes
pub mod communities;
pub mod contributor_requests;
pub mod dashboard;
pub mod health;
pub mod members;
pub mod posts;
pub mod reviews;

pub use health::*;

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;

/// `{ "message": ... }` body returned by mutations without a payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn json(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Community-scoped JSON API
pub fn api_routes() -> Router {
    Router::new()
        .route("/communities", post(communities::create_community))
        .route("/communities/:community_id", get(communities::get_community))
        .route("/communities/:community_id/join", post(communities::join))
        .route("/communities/:community_id/members", get(members::list_members))
        .route(
            "/communities/:community_id/members/:member_id/promote",
            post(members::promote),
        )
        .route(
            "/communities/:community_id/members/:member_id/demote",
            post(members::demote),
        )
        .route(
            "/communities/:community_id/members/:member_id/ban",
            post(members::ban),
        )
        .route(
            "/communities/:community_id/contributors/count",
            get(members::count_contributors),
        )
        .route(
            "/communities/:community_id/contributor-requests",
            get(contributor_requests::list_requests).post(contributor_requests::create_request),
        )
        .route(
            "/communities/:community_id/contributor-requests/:request_id/approve",
            post(contributor_requests::approve),
        )
        .route(
            "/communities/:community_id/contributor-requests/:request_id/reject",
            put(contributor_requests::reject),
        )
        .route(
            "/communities/:community_id/posts",
            get(posts::list_posts).post(posts::create_post),
        )
        .route(
            "/communities/:community_id/review-queue",
            get(posts::review_queue),
        )
        .route(
            "/communities/:community_id/posts/:post_id/reviews",
            post(reviews::submit_review),
        )
        .route(
            "/communities/:community_id/posts/:post_id/reviews/count",
            get(reviews::review_count),
        )
        .route(
            "/communities/:community_id/posts/:post_id/reviews/tally",
            get(reviews::review_tally),
        )
        .route("/communities/:community_id/dashboard", get(dashboard::dashboard))
}

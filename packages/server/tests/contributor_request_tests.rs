//! Integration tests for the learner -> contributor request workflow.

mod common;

use axum::http::StatusCode;
use common::{create_user, membership_rows, seed_community, SeededCommunity, TestHarness};
use serde_json::{json, Value};
use test_context::test_context;

async fn submit_request(ctx: &TestHarness, community: &SeededCommunity) -> Value {
    let res = ctx
        .api()
        .post(
            &community.path("/contributor-requests"),
            Some(community.learners[0]),
            json!({
                "justification": "I have taught Rust for three years",
                "expertise_domain": "Systems programming"
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
    res.body
}

#[test_context(TestHarness)]
#[tokio::test]
async fn learner_submits_a_pending_request(ctx: &TestHarness) {
    let community = seed_community(&ctx.db_pool, 1, 0).await.unwrap();

    let request = submit_request(ctx, &community).await;
    assert_eq!(request["status"], "pending");
    assert_eq!(request["expertise_domain"], "Systems programming");

    let duplicate = ctx
        .api()
        .post(
            &community.path("/contributor-requests"),
            Some(community.learners[0]),
            json!({ "justification": "Please" }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_learners_can_request(ctx: &TestHarness) {
    let community = seed_community(&ctx.db_pool, 1, 1).await.unwrap();
    let outsider = create_user(&ctx.db_pool, "Outsider").await.unwrap();
    let api = ctx.api();
    let body = json!({ "justification": "Let me in" });

    let contributor = api
        .post(&community.path("/contributor-requests"), Some(community.contributors[0]), body.clone())
        .await;
    assert_eq!(contributor.status, StatusCode::CONFLICT);

    let stranger = api
        .post(&community.path("/contributor-requests"), Some(outsider), body.clone())
        .await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);

    let empty = api
        .post(
            &community.path("/contributor-requests"),
            Some(community.learners[0]),
            json!({ "justification": "" }),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approval_promotes_the_requester(ctx: &TestHarness) {
    let community = seed_community(&ctx.db_pool, 1, 0).await.unwrap();
    let learner = community.learners[0];
    let request = submit_request(ctx, &community).await;
    let approve_path = community.path(&format!(
        "/contributor-requests/{}/approve",
        request["id"].as_str().unwrap()
    ));

    let res = ctx.api().post(&approve_path, Some(community.creator), json!({})).await;
    assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
    assert_eq!(
        membership_rows(&ctx.db_pool, community.id, learner).await.unwrap(),
        (false, true, false)
    );

    let again = ctx.api().post(&approve_path, Some(community.creator), json!({})).await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rejection_requires_reason_and_keeps_learner(ctx: &TestHarness) {
    let community = seed_community(&ctx.db_pool, 1, 0).await.unwrap();
    let request = submit_request(ctx, &community).await;
    let reject_path = community.path(&format!(
        "/contributor-requests/{}/reject",
        request["id"].as_str().unwrap()
    ));
    let api = ctx.api();

    let no_reason = api.put(&reject_path, Some(community.creator), json!({ "reason": "" })).await;
    assert_eq!(no_reason.status, StatusCode::BAD_REQUEST);

    let missing_reason = api.put(&reject_path, Some(community.creator), json!({})).await;
    assert_eq!(missing_reason.status, StatusCode::BAD_REQUEST);
    assert!(!missing_reason.error().is_empty());

    let res = api
        .put(&reject_path, Some(community.creator), json!({ "reason": "Not enough experience yet" }))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        membership_rows(&ctx.db_pool, community.id, community.learners[0]).await.unwrap(),
        (true, false, false)
    );

    let list = api.get(&community.path("/contributor-requests"), Some(community.creator)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body[0]["status"], "rejected");
    assert_eq!(list.body[0]["rejection_reason"], "Not enough experience yet");

    // A rejected learner may try again
    submit_request(ctx, &community).await;
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_creator_reviews_requests(ctx: &TestHarness) {
    let community = seed_community(&ctx.db_pool, 2, 0).await.unwrap();
    let request = submit_request(ctx, &community).await;
    let api = ctx.api();

    let approve = api
        .post(
            &community.path(&format!(
                "/contributor-requests/{}/approve",
                request["id"].as_str().unwrap()
            )),
            Some(community.learners[1]),
            json!({}),
        )
        .await;
    assert_eq!(approve.status, StatusCode::FORBIDDEN);

    let list = api
        .get(&community.path("/contributor-requests"), Some(community.learners[1]))
        .await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);

    let missing = api
        .post(
            &community.path(&format!("/contributor-requests/{}/approve", uuid::Uuid::new_v4())),
            Some(community.creator),
            json!({}),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

use crate::e2e::helpers;

use axum::http::StatusCode;
use helpers::mocks::SAMPLE_SCRIPT;
use helpers::{TestContext, PUBLIC_BASE_URL};
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_explore_topic_with_research_notes(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/explore-topic", &json!({ "topic": "quantum computing" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body["exploration"], SAMPLE_SCRIPT);
    assert_eq!(body["cached"], false);
    assert_eq!(
        body["audio_url"],
        format!(
            "{}/api/cache/audio/explorations/quantum_computing.mp3",
            PUBLIC_BASE_URL
        )
    );

    assert_eq!(ctx.research.call_count(), 1);
    let prompt = ctx.script_writer.last_prompt().unwrap();
    assert!(prompt.user.contains("exploring the topic: quantum computing"));
    assert!(prompt.user.contains("Recent studies point to steady progress."));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_fallback_when_research_fails(ctx: &TestContext) {
    ctx.research.set_response(Err("research service down"));

    let response = ctx
        .client
        .post("/api/explore-topic", &json!({ "topic": "coral reefs" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let prompt = ctx.script_writer.last_prompt().unwrap();
    assert!(prompt.user.contains("what we know about coral reefs"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_repeat_exploration_from_cache(ctx: &TestContext) {
    let body = json!({ "topic": "coral reefs" });
    ctx.client
        .post("/api/explore-topic", &body)
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx.client.post("/api/explore-topic", &body).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json()["cached"], true);
    assert_eq!(ctx.research.call_count(), 1);
    assert_eq!(ctx.script_writer.call_count(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_collide_with_category_cache(ctx: &TestContext) {
    ctx.client
        .post("/api/explore-topic", &json!({ "topic": "business" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    assert!(ctx.cache.contains("explorations/business.json").await);
    assert!(!ctx.cache.contains("summaries/business.json").await);
    assert!(!ctx.cache.contains("audio/business.mp3").await);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_topic(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/explore-topic", &json!({ "topic": "   " }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Topic is required");
    assert_eq!(ctx.research.call_count(), 0);
    assert_eq!(ctx.script_writer.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_string_topic(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/explore-topic", &json!({ "topic": 42 }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid input: Failed to deserialize the JSON body")
        .assert_error_message("topic");
    assert_eq!(ctx.research.call_count(), 0);
    assert_eq!(ctx.script_writer.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_500_when_all_synthesis_fails(ctx: &TestContext) {
    ctx.script_writer.set_response(Ok("Host A: Only line."));
    ctx.tts.fail_on("Only line.");

    let response = ctx
        .client
        .post("/api/explore-topic", &json!({ "topic": "volcanoes" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!ctx.cache.contains("explorations/volcanoes.json").await);
}

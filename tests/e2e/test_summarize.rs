use crate::e2e::helpers;

use axum::http::StatusCode;
use helpers::mocks::{sample_article, MockTtsRepository, SAMPLE_SCRIPT};
use helpers::{TestContext, HOST_A_VOICE, HOST_B_VOICE, PUBLIC_BASE_URL};
use news_podcast_backend::infrastructure::repositories::CacheRepository;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

fn summarize_body(category: &str) -> serde_json::Value {
    json!({
        "articles": [sample_article()],
        "category": category
    })
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_script_and_audio_on_miss(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/summarize", &summarize_body("business"))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body["summary"], SAMPLE_SCRIPT);
    assert_eq!(body["cached"], false);
    assert_eq!(
        body["audio_url"],
        format!("{}/api/cache/audio/business.mp3", PUBLIC_BASE_URL)
    );

    let prompt = ctx.script_writer.last_prompt().unwrap();
    assert!(prompt.user.contains("news articles about business"));
    assert!(prompt.user.contains("Title: Stocks rally on earnings"));
    assert!(!prompt.user.contains("[+1200 chars]"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_voice_each_turn_in_order(ctx: &TestContext) {
    ctx.client
        .post("/api/summarize", &summarize_body("business"))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let calls = ctx.tts.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            (
                "Markets closed higher today. Tech led the gains.".to_string(),
                HOST_A_VOICE.to_string()
            ),
            (
                "Investors cheered the earnings beat.".to_string(),
                HOST_B_VOICE.to_string()
            ),
            (
                "And oil slipped two percent.".to_string(),
                HOST_A_VOICE.to_string()
            ),
        ]
    );

    let expected: Vec<u8> = calls
        .iter()
        .flat_map(|(text, voice)| MockTtsRepository::clip(voice, text))
        .collect();
    assert_eq!(ctx.cache.get_binary("audio/business.mp3").await, Some(expected));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_second_request_from_cache(ctx: &TestContext) {
    ctx.client
        .post("/api/summarize", &summarize_body("business"))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    ctx.script_writer.set_response(Ok("Host A: Something else entirely."));

    let response = ctx
        .client
        .post("/api/summarize", &summarize_body("business"))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body["cached"], true);
    assert_eq!(body["summary"], SAMPLE_SCRIPT);
    assert_eq!(ctx.script_writer.call_count(), 1);
    assert_eq!(ctx.tts.call_count(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_share_cache_for_equivalent_categories(ctx: &TestContext) {
    ctx.client
        .post("/api/summarize", &summarize_body("AI & Robots!"))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx
        .client
        .post("/api/summarize", &summarize_body("AI  Robots"))
        .await
        .unwrap();

    assert_eq!(response.json()["cached"], true);
    assert!(ctx.cache.contains("summaries/AI_Robots.json").await);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_funny_style_separate(ctx: &TestContext) {
    ctx.client
        .post("/api/summarize", &summarize_body("sports"))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx
        .client
        .post(
            "/api/summarize",
            &json!({
                "articles": [sample_article()],
                "category": "sports",
                "style": "funny"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json()["cached"], false);
    assert!(ctx.script_writer.last_prompt().unwrap().user.contains("make it funny"));
    assert!(ctx.cache.contains("audio/sports_funny.mp3").await);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_articles(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/summarize", &json!({ "articles": [], "category": "business" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No articles provided");
    assert_eq!(ctx.script_writer.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_category(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/summarize", &json!({ "articles": [sample_article()] }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Category is required");
    assert_eq!(ctx.script_writer.call_count(), 0);
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_body(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/summarize", r#"{"articles": [{"title": "Half a body""#)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid input: Failed to parse the request body as JSON");
    assert_eq!(ctx.script_writer.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_wrongly_typed_articles(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/summarize", &json!({ "articles": "x", "category": "business" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Failed to deserialize the JSON body")
        .assert_error_message("articles");
    assert_eq!(ctx.script_writer.call_count(), 0);
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_500_and_skip_cache_when_generation_fails(ctx: &TestContext) {
    ctx.script_writer.set_response(Err("model overloaded"));

    let response = ctx
        .client
        .post("/api/summarize", &summarize_body("business"))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("model overloaded");
    assert!(!ctx.cache.contains("summaries/business.json").await);
    assert_eq!(ctx.tts.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_turns_that_fail_to_synthesize(ctx: &TestContext) {
    ctx.tts.fail_on("Investors cheered the earnings beat.");

    let response = ctx
        .client
        .post("/api/summarize", &summarize_body("business"))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let audio = ctx.cache.get_binary("audio/business.mp3").await.unwrap();
    let audio = String::from_utf8(audio).unwrap();
    assert!(audio.contains("Tech led the gains."));
    assert!(!audio.contains("Investors"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_500_when_script_has_no_host_turns(ctx: &TestContext) {
    ctx.script_writer
        .set_response(Ok("Sorry, I cannot write that podcast."));

    let response = ctx
        .client
        .post("/api/summarize", &summarize_body("business"))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!ctx.cache.contains("audio/business.mp3").await);
}

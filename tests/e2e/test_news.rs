use crate::e2e::helpers;

use axum::http::StatusCode;
use helpers::TestContext;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_business_headlines_by_default(ctx: &TestContext) {
    let response = ctx.client.get("/api/news").await.unwrap();

    response.assert_status(StatusCode::OK);
    let articles = response.json()["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0]["title"], "Stocks rally on earnings");

    let queries = ctx.news.queries.lock().unwrap();
    assert_eq!(queries[0].country, "us");
    assert_eq!(queries[0].category, "business");
    assert_eq!(queries[0].page_size, 5);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_pass_category_and_page_size(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/news?category=Technology&pageSize=10")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let queries = ctx.news.queries.lock().unwrap();
    assert_eq!(queries[0].category, "technology");
    assert_eq!(queries[0].page_size, 10);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_numeric_page_size(ctx: &TestContext) {
    let response = ctx.client.get("/api/news?pageSize=abc").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid input: Failed to deserialize query string");
    assert!(ctx.news.queries.lock().unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_when_no_articles(ctx: &TestContext) {
    ctx.news.set_response(Ok(vec![]));

    let response = ctx.client.get("/api/news?category=science").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("No articles found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_500_when_news_source_fails(ctx: &TestContext) {
    ctx.news.set_response(Err("NewsAPI returned 401: apiKeyInvalid".to_string()));

    let response = ctx.client.get("/api/news").await.unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("apiKeyInvalid");
}

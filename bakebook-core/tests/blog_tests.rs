//! Directus client against a mock HTTP server.

use bakebook_core::{load_blog_listing, BlogClient, BlogListing, DirectusClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetches_published_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/posts"))
        .and(query_param("filter[status][_eq]", "published"))
        .and(query_param("sort", "-published_at"))
        .and(query_param("limit", "-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": 2,
                    "title": "Why bakers weigh flour",
                    "slug": "why-weigh-flour",
                    "description": "Cups lie.",
                    "published_at": "2025-04-02T08:00:00Z",
                    "status": "published"
                },
                {
                    "id": 5,
                    "title": "Scaling laminated dough",
                    "slug": "scaling-laminated-dough",
                    "description": null,
                    "published_at": "2025-05-10T08:00:00Z",
                    "status": "published"
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = DirectusClient::new(&server.uri()).unwrap();
    let posts = client.published_posts().await.unwrap();
    assert_eq!(posts.len(), 2);

    let BlogListing::Posts(posts) = load_blog_listing(&client).await else {
        panic!("expected posts");
    };
    assert_eq!(posts[0].slug, "scaling-laminated-dough");
    assert_eq!(posts[1].description.as_deref(), Some("Cups lie."));
}

#[tokio::test]
async fn test_server_error_becomes_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = DirectusClient::new(&server.uri()).unwrap();
    assert!(matches!(
        load_blog_listing(&client).await,
        BlogListing::Unavailable(_)
    ));
}

#[tokio::test]
async fn test_malformed_body_becomes_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = DirectusClient::new(&server.uri()).unwrap();
    assert!(matches!(
        load_blog_listing(&client).await,
        BlogListing::Unavailable(_)
    ));
}

#[tokio::test]
async fn test_no_posts_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = DirectusClient::new(&server.uri()).unwrap();
    assert_eq!(load_blog_listing(&client).await, BlogListing::Empty);
}

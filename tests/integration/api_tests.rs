//! HTTP repository tests
//!
//! These tests use wiremock to stand in for the content API.

use pulse_browser::api::{ContentRepository, HttpRepository};
use pulse_browser::config::Config;
use pulse_browser::ApiError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Repository pointed at the mock server's /api/v1 prefix
fn repository(server: &MockServer) -> HttpRepository {
    let mut config = Config::default();
    config.api.base_url = format!("{}/api/v1", server.uri());
    config.api.request_timeout_secs = 1;
    config.api.connect_timeout_secs = 1;
    HttpRepository::new(&config.api, &config.user_agent).expect("Failed to build repository")
}

fn influencer_json(id: &str, name: &str, account: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "accounts": [{
            "id": account,
            "influencerId": id,
            "username": name.to_lowercase().replace(' ', ""),
            "bio": "bio",
            "followersCount": "1200",
            "followingCount": "34",
            "social": {"id": "s1", "platform": "twitter"}
        }],
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_search_influencers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/influencers"))
        .and(query_param("search", "elena voss"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"code": 200, "message": "ok", "itemCount": 1, "totalItems": 1,
                     "itemsPerPage": 10, "totalPages": 1, "currentPage": 1},
            "data": [influencer_json("inf-1", "Elena Voss", "acc1")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = repository(&mock_server)
        .search_influencers("elena voss")
        .await
        .expect("Search failed");

    assert_eq!(response.meta.total_items, 1);
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].accounts[0].id, "acc1");
}

#[tokio::test]
async fn test_search_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/influencers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = repository(&mock_server).search_influencers("elena").await;
    match result {
        Err(ApiError::Status { status, url }) => {
            assert_eq!(status, 503);
            assert!(url.contains("/api/v1/influencers?search=elena"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/influencers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let result = repository(&mock_server).search_influencers("x").await;
    assert!(matches!(result, Err(ApiError::Decode { .. })));
}

#[tokio::test]
async fn test_list_posts_sends_page_and_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/acc1/posts"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"totalItems": 14, "currentPage": 2},
            "data": [
                {"id": "p11", "title": "Eleven", "postedAt": "2024-01-15",
                 "socialAccountId": "acc1", "isDownloaded": true,
                 "filePath": "downloads/p11.mp4", "hashtags": ["a"]},
                {"id": "p12", "title": "Twelve", "postedAt": "2024-01-14",
                 "socialAccountId": "acc1", "isDownloaded": false}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = repository(&mock_server)
        .list_posts("acc1", 2, 10)
        .await
        .expect("Listing failed");

    assert_eq!(response.meta.total_items, 14);
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0].file_path.as_deref(), Some("downloads/p11.mp4"));
    assert!(!response.data[1].is_downloaded);
}

#[tokio::test]
async fn test_trigger_crawl_posts_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .and(body_json(json!({"username": "elenavoss", "maxCollectCount": 20})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "queued"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = repository(&mock_server)
        .trigger_crawl("elenavoss", 20)
        .await
        .expect("Crawl failed");

    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("queued"));
}

#[tokio::test]
async fn test_unsuccessful_crawl_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/crawl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "unknown user"})),
        )
        .mount(&mock_server)
        .await;

    let result = repository(&mock_server).trigger_crawl("ghost", 20).await;
    match result {
        Err(ApiError::Rejected(message)) => assert_eq!(message, "unknown user"),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/influencers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let result = repository(&mock_server).search_influencers("slow").await;
    assert!(matches!(result, Err(ApiError::Timeout { millis: 1000 })));
}

//! Browsing scenarios through the session runtime
//!
//! Most tests use an in-memory repository under paused tokio time so settle
//! delays and timeouts run instantly; the last one goes over HTTP end-to-end.

use async_trait::async_trait;
use pulse_browser::api::{
    Account, ApiPost, ContentRepository, CrawlResponse, HttpRepository, Influencer,
    InfluencersResponse, PostsResponse,
};
use pulse_browser::config::{Config, FallbackPolicy};
use pulse_browser::state::{Intent, Navigator, NavigatorSettings, View};
use pulse_browser::{ApiError, ApiResult, Session};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// In-memory repository with per-account post counts and delays
#[derive(Default)]
struct FakeRepository {
    influencers: Vec<Influencer>,
    /// (account, page) -> number of posts on that page
    pages: HashMap<(String, u32), usize>,
    /// Artificial latency per account
    delays: HashMap<String, Duration>,
    fail_search: bool,
    list_calls: Mutex<Vec<(String, u32)>>,
    crawl_calls: AtomicUsize,
}

impl FakeRepository {
    fn with_influencer(mut self, id: &str, name: &str, account: &str) -> Self {
        self.influencers.push(Influencer {
            id: id.to_string(),
            name: name.to_string(),
            accounts: vec![Account {
                id: account.to_string(),
                username: format!("{}_user", id),
                ..Default::default()
            }],
            ..Default::default()
        });
        self
    }

    fn with_page(mut self, account: &str, page: u32, count: usize) -> Self {
        self.pages.insert((account.to_string(), page), count);
        self
    }

    fn with_delay(mut self, account: &str, delay: Duration) -> Self {
        self.delays.insert(account.to_string(), delay);
        self
    }

    fn list_calls(&self) -> Vec<(String, u32)> {
        self.list_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentRepository for FakeRepository {
    async fn search_influencers(&self, query: &str) -> ApiResult<InfluencersResponse> {
        if self.fail_search {
            return Err(ApiError::Status {
                url: "fake://influencers".to_string(),
                status: 500,
            });
        }
        let needle = query.to_lowercase();
        Ok(InfluencersResponse {
            meta: Default::default(),
            data: self
                .influencers
                .iter()
                .filter(|i| i.name.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        })
    }

    async fn list_posts(&self, account: &str, page: u32, _limit: u32) -> ApiResult<PostsResponse> {
        self.list_calls.lock().unwrap().push((account.to_string(), page));
        if let Some(delay) = self.delays.get(account) {
            tokio::time::sleep(*delay).await;
        }

        let count = self
            .pages
            .get(&(account.to_string(), page))
            .copied()
            .unwrap_or(0);
        Ok(PostsResponse {
            meta: Default::default(),
            data: (0..count)
                .map(|i| ApiPost {
                    id: format!("{}-p{}-{}", account, page, i),
                    title: format!("Post {} on page {}", i, page),
                    social_account_id: account.to_string(),
                    ..Default::default()
                })
                .collect(),
        })
    }

    async fn trigger_crawl(&self, _username: &str, _max: u32) -> ApiResult<CrawlResponse> {
        self.crawl_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(CrawlResponse {
            success: true,
            message: None,
        })
    }
}

fn session(repository: Arc<FakeRepository>) -> Session<FakeRepository> {
    let mut settings = NavigatorSettings::default();
    settings.fallback = FallbackPolicy::None;
    Session::new(Navigator::new(settings), repository, Duration::from_secs(5))
}

fn elena_repository() -> FakeRepository {
    FakeRepository::default()
        .with_influencer("u1", "Elena Voss", "acc1")
        .with_influencer("u2", "Elena Park", "acc2")
        .with_influencer("u3", "James Chen", "acc3")
}

async fn search_and_open(session: &mut Session<FakeRepository>, query: &str, user_id: &str) {
    session.dispatch(Intent::Search(query.to_string()));
    session.settle().await;
    session.dispatch(Intent::SelectUser(user_id.to_string()));
    session.settle().await;
}

#[tokio::test(start_paused = true)]
async fn test_search_scenario() {
    let repository = Arc::new(elena_repository());
    let mut session = session(Arc::clone(&repository));

    session.dispatch(Intent::Search("elena".to_string()));
    assert!(session.state().is_searching());
    session.settle().await;

    assert_eq!(session.state().search_results().len(), 2);
    assert_eq!(session.state().view(), View::Users);
    assert!(!session.state().is_searching());
}

#[tokio::test(start_paused = true)]
async fn test_pagination_scenario() {
    let repository = Arc::new(
        elena_repository()
            .with_page("acc1", 1, 10)
            .with_page("acc1", 2, 4),
    );
    let mut session = session(Arc::clone(&repository));

    search_and_open(&mut session, "elena", "u1").await;
    assert_eq!(session.state().user_posts().len(), 10);
    assert!(session.state().has_more());

    session.dispatch(Intent::NearEnd);
    // second trigger while page 2 is in flight is dropped
    session.dispatch(Intent::NearEnd);
    session.settle().await;

    assert_eq!(session.state().user_posts().len(), 14);
    assert!(!session.state().has_more());
    assert_eq!(
        repository.list_calls(),
        vec![("acc1".to_string(), 1), ("acc1".to_string(), 2)]
    );

    // exhausted: no further requests
    session.dispatch(Intent::NearEnd);
    session.settle().await;
    assert_eq!(repository.list_calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_slow_page_from_previous_profile_is_discarded() {
    let repository = Arc::new(
        elena_repository()
            .with_page("acc1", 1, 10)
            .with_page("acc2", 1, 3)
            .with_delay("acc1", Duration::from_secs(2)),
    );
    let mut session = session(Arc::clone(&repository));

    session.dispatch(Intent::Search("elena".to_string()));
    session.settle().await;

    // leave u1's profile before its first page arrives
    session.dispatch(Intent::SelectUser("u1".to_string()));
    session.dispatch(Intent::Back);
    assert_eq!(session.pending_requests(), 0);

    session.dispatch(Intent::SelectUser("u2".to_string()));
    session.settle().await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    session.settle().await;

    let posts = session.state().user_posts();
    assert_eq!(posts.len(), 3);
    assert!(posts.iter().all(|p| p.user_id == "u2"));
}

#[tokio::test(start_paused = true)]
async fn test_request_timeout_keeps_state_and_allows_retry() {
    let repository = Arc::new(
        elena_repository()
            .with_page("acc1", 1, 10)
            .with_delay("acc1", Duration::from_secs(60)),
    );
    let mut session = session(Arc::clone(&repository));

    search_and_open(&mut session, "elena", "u1").await;

    assert!(session.state().user_posts().is_empty());
    assert!(session.state().has_more());
    assert!(!session.state().is_loading_posts());
    assert!(session
        .state()
        .last_error()
        .is_some_and(|e| e.contains("timed out")));

    // retry goes for page 1 again
    session.dispatch(Intent::NearEnd);
    assert!(session.state().is_loading_posts());
    session.settle().await;
    assert_eq!(
        repository.list_calls(),
        vec![("acc1".to_string(), 1), ("acc1".to_string(), 1)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_crawl_scenario() {
    let repository = Arc::new(elena_repository());
    let mut session = session(Arc::clone(&repository));

    search_and_open(&mut session, "james", "u3").await;
    assert!(session.state().user_posts().is_empty());
    assert_eq!(repository.list_calls().len(), 1);

    session.dispatch(Intent::RequestCrawl);
    assert!(session.state().is_crawling());

    // rejected while pending
    session.dispatch(Intent::RequestCrawl);

    // crawl completion clears the busy flag and schedules the re-fetch
    assert!(session.process_next().await);
    assert!(!session.state().is_crawling());
    assert!(session.state().is_loading_posts());

    session.settle().await;
    assert_eq!(repository.crawl_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        repository.list_calls(),
        vec![("acc3".to_string(), 1), ("acc3".to_string(), 1)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_search_failure_shows_error_and_empty_results() {
    let repository = Arc::new(FakeRepository {
        fail_search: true,
        ..elena_repository()
    });
    let mut session = session(repository);

    session.dispatch(Intent::Search("elena".to_string()));
    session.settle().await;

    assert!(session.state().search_results().is_empty());
    assert!(session.state().last_error().is_some());
    assert_eq!(session.state().view(), View::Users);
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/influencers"))
        .and(query_param("search", "elena"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "inf-1",
                "name": "Elena Voss",
                "accounts": [{"id": "acc1", "username": "elenavoss",
                              "followersCount": "4200000", "followingCount": "892"}]
            }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts/acc1/posts"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"totalItems": 2},
            "data": [
                {"id": "p1", "title": "A video", "postedAt": "2024-01-15",
                 "isDownloaded": true, "filePath": "./downloads/p1.mp4"},
                {"id": "p2", "title": "A thought", "postedAt": "2024-01-14",
                 "isDownloaded": false}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.api.base_url = format!("{}/api/v1", mock_server.uri());
    config.media.base_url = "https://media.example.com".to_string();
    config.media.strip_prefix = "downloads".to_string();

    let repository =
        HttpRepository::new(&config.api, &config.user_agent).expect("Failed to build repository");
    let mut session = Session::new(
        Navigator::from_config(&config),
        Arc::new(repository),
        config.api.request_timeout(),
    );

    session.dispatch(Intent::Search("elena".to_string()));
    session.settle().await;
    assert_eq!(session.state().search_results()[0].followers, 4_200_000);

    session.dispatch(Intent::SelectUser("inf-1".to_string()));
    session.settle().await;

    let posts = session.state().user_posts();
    assert_eq!(posts.len(), 2);
    assert!(!session.state().has_more());
    assert_eq!(
        posts[0].media.as_ref().map(|m| m.url.as_str()),
        Some("https://media.example.com/p1.mp4")
    );
    assert!(posts[1].media.is_none());

    session.dispatch(Intent::SelectPost("p1".to_string()));
    assert_eq!(session.state().view(), View::Post);
    session.dispatch(Intent::Back);
    session.dispatch(Intent::Back);
    assert_eq!(session.state().view(), View::Users);
    assert!(session.state().user_posts().is_empty());
}

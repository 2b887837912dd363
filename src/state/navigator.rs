//! Navigation state machine
//!
//! `Navigator::dispatch` is the only way the view state changes. It applies an
//! intent synchronously and returns the commands the caller has to run; the
//! results of those commands come back later as completion intents.
//!
//! # Transitions
//!
//! | From | Intent | To |
//! |------|--------|----|
//! | users | `Search` | users (results replaced on completion) |
//! | users | `SelectUser` | profile (first page requested) |
//! | profile | `SelectPost` | post |
//! | post | `Back` | profile |
//! | profile | `Back` | users (selection and posts cleared) |
//! | profile | `NearEnd` / `Scrolled` | profile (next page requested) |
//! | profile | `RequestCrawl` | profile (page 1 re-fetched after settle delay) |
//! | any | `Home` | users (everything cleared) |
//!
//! Anything else is a logged no-op.

use crate::adapters::{map_api_post_to_post, map_influencer_to_user, MediaLocator};
use crate::api::{CrawlResponse, InfluencersResponse, PostsResponse};
use crate::config::{Config, FallbackPolicy};
use crate::fallback::Fallback;
use crate::state::{Command, Intent, RequestToken, View, ViewState, PAGE_SIZE};
use crate::ApiResult;
use std::time::Duration;

/// Tunables for the navigator
#[derive(Debug, Clone)]
pub struct NavigatorSettings {
    /// Scroll positions this close to the end of the list trigger a load
    pub prefetch_distance: usize,

    /// Wait between a finished crawl and the page 1 re-fetch
    pub crawl_settle_delay: Duration,

    pub max_collect_count: u32,

    pub media: MediaLocator,

    pub fallback: FallbackPolicy,
}

impl From<&Config> for NavigatorSettings {
    fn from(config: &Config) -> Self {
        Self {
            prefetch_distance: config.browse.prefetch_distance,
            crawl_settle_delay: config.browse.crawl_settle_delay(),
            max_collect_count: config.browse.max_collect_count,
            media: MediaLocator::from(&config.media),
            fallback: config.browse.fallback,
        }
    }
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Owner of the view state
#[derive(Debug)]
pub struct Navigator {
    state: ViewState,
    settings: NavigatorSettings,
    fallback: Fallback,
    next_token: u64,
}

impl Navigator {
    pub fn new(settings: NavigatorSettings) -> Self {
        Self {
            state: ViewState::default(),
            fallback: Fallback::new(settings.fallback),
            settings,
            next_token: 1,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(NavigatorSettings::from(config))
    }

    /// Read-only snapshot for rendering
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn settings(&self) -> &NavigatorSettings {
        &self.settings
    }

    /// Applies an intent and returns the side effects to run
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Command> {
        let commands = match intent {
            Intent::Search(query) => self.search(query),
            Intent::SelectUser(id) => self.select_user(&id),
            Intent::SelectPost(id) => self.select_post(&id),
            Intent::Back => self.back(),
            Intent::Home => self.home(),
            Intent::NearEnd => self.load_more(),
            Intent::Scrolled { position } => self.scrolled(position),
            Intent::RequestCrawl => self.request_crawl(),
            Intent::SearchCompleted {
                token,
                query,
                outcome,
            } => self.search_completed(token, &query, outcome),
            Intent::PageLoaded {
                token,
                page,
                outcome,
            } => self.page_loaded(token, page, outcome),
            Intent::CrawlCompleted { token, outcome } => self.crawl_completed(token, outcome),
        };

        debug_assert!(self.state.is_consistent(), "view state invariant broken");
        commands
    }

    fn issue_token(&mut self) -> RequestToken {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        token
    }

    // ===== Users view =====

    fn search(&mut self, query: String) -> Vec<Command> {
        if self.state.view != View::Users {
            tracing::debug!("Ignoring search outside the users view");
            return Vec::new();
        }
        if let Some(pending) = self.state.search_in_flight {
            tracing::debug!("Search {} still pending, ignoring '{}'", pending, query);
            return Vec::new();
        }

        let query = query.trim().to_string();
        let token = self.issue_token();
        tracing::info!("Searching influencers for '{}'", query);

        self.state.search_in_flight = Some(token);
        self.state.last_query = query.clone();
        vec![Command::Search { token, query }]
    }

    fn search_completed(
        &mut self,
        token: RequestToken,
        query: &str,
        outcome: ApiResult<InfluencersResponse>,
    ) -> Vec<Command> {
        if self.state.search_in_flight != Some(token) {
            tracing::debug!("Discarding stale search result {}", token);
            return Vec::new();
        }
        self.state.search_in_flight = None;

        match outcome {
            Ok(response) => {
                let users: Vec<_> = response.data.iter().map(map_influencer_to_user).collect();
                tracing::info!("Search '{}' returned {} influencers", query, users.len());
                self.fallback.remember(query, &users);
                self.state.search_results = users;
                self.state.last_error = None;
            }
            Err(e) => {
                let recovered = self.fallback.recover_search(query);
                tracing::warn!(
                    "Search '{}' failed: {} ({} fallback results)",
                    query,
                    e,
                    recovered.len()
                );
                self.state.last_error =
                    Some(format!("Search failed: {}; {}", e, self.fallback.describe()));
                self.state.search_results = recovered;
            }
        }

        Vec::new()
    }

    fn select_user(&mut self, id: &str) -> Vec<Command> {
        if self.state.view != View::Users {
            tracing::debug!("Ignoring user selection outside the users view");
            return Vec::new();
        }
        let Some(user) = self.state.search_results.iter().find(|u| u.id == id).cloned() else {
            tracing::debug!("No user '{}' in the current results", id);
            return Vec::new();
        };

        let mut commands = Vec::new();

        // results may still change under the user's feet otherwise
        if let Some(pending) = self.state.search_in_flight.take() {
            commands.push(Command::Cancel(pending));
        }
        if let Some(stale) = self.state.pagination.reset() {
            commands.push(Command::Cancel(stale));
        }

        tracing::info!("Opening profile of {} (@{})", user.name, user.username);
        self.state.view = View::Profile;
        self.state.selected_post = None;
        self.state.user_posts.clear();
        self.state.total_posts = None;

        match user.social_account_id.clone() {
            Some(account_id) => {
                self.state.selected_user = Some(user);
                commands.extend(self.fetch_next_page(account_id, None));
            }
            None => {
                self.state.user_posts = self.fallback.posts_for_unlinked(&user);
                tracing::debug!(
                    "{} has no linked account, {} local posts",
                    user.name,
                    self.state.user_posts.len()
                );
                self.state.selected_user = Some(user);
            }
        }

        commands
    }

    // ===== Profile view =====

    fn select_post(&mut self, id: &str) -> Vec<Command> {
        if self.state.view != View::Profile {
            tracing::debug!("Ignoring post selection outside the profile view");
            return Vec::new();
        }
        let Some(post) = self.state.user_posts.iter().find(|p| p.id == id).cloned() else {
            tracing::debug!("No post '{}' on this profile", id);
            return Vec::new();
        };

        self.state.selected_post = Some(post);
        self.state.view = View::Post;
        Vec::new()
    }

    fn scrolled(&mut self, position: usize) -> Vec<Command> {
        if self.state.view != View::Profile {
            return Vec::new();
        }
        if position.saturating_add(self.settings.prefetch_distance) >= self.state.user_posts.len() {
            self.load_more()
        } else {
            Vec::new()
        }
    }

    fn load_more(&mut self) -> Vec<Command> {
        if self.state.view != View::Profile {
            tracing::debug!("Ignoring load-more outside the profile view");
            return Vec::new();
        }
        let Some(account_id) = self
            .state
            .selected_user
            .as_ref()
            .and_then(|u| u.social_account_id.clone())
        else {
            return Vec::new();
        };

        if !self.state.pagination.can_load() {
            tracing::debug!(
                "Load-more dropped (in flight: {}, has more: {})",
                self.state.pagination.is_loading(),
                self.state.pagination.has_more()
            );
            return Vec::new();
        }

        self.fetch_next_page(account_id, None)
    }

    fn fetch_next_page(&mut self, account_id: String, delay: Option<Duration>) -> Vec<Command> {
        let token = self.issue_token();
        match self.state.pagination.begin(token) {
            Some(page) => {
                tracing::debug!("Requesting page {} for account {}", page, account_id);
                vec![Command::FetchPosts {
                    token,
                    account_id,
                    page,
                    limit: PAGE_SIZE,
                    delay,
                }]
            }
            None => Vec::new(),
        }
    }

    fn page_loaded(
        &mut self,
        token: RequestToken,
        page: u32,
        outcome: ApiResult<PostsResponse>,
    ) -> Vec<Command> {
        if !self.state.pagination.is_current(token) {
            tracing::debug!("Discarding stale page {} ({})", page, token);
            return Vec::new();
        }
        let Some(user_id) = self.state.selected_user.as_ref().map(|u| u.id.clone()) else {
            self.state.pagination.fail(token);
            return Vec::new();
        };

        match outcome {
            Ok(response) => {
                let returned = response.data.len();
                let posts = response
                    .data
                    .iter()
                    .map(|p| map_api_post_to_post(p, &user_id, &self.settings.media));

                self.state.user_posts.extend(posts);
                self.state.pagination.complete(token, returned);
                if response.meta.total_items > 0 {
                    self.state.total_posts = Some(response.meta.total_items);
                }
                self.state.last_error = None;

                tracing::debug!(
                    "Page {} added {} posts ({} total, more: {})",
                    page,
                    returned,
                    self.state.user_posts.len(),
                    self.state.pagination.has_more()
                );
            }
            Err(e) => {
                tracing::warn!("Loading page {} failed: {}", page, e);
                self.state.pagination.fail(token);
                self.state.last_error = Some(format!("Could not load page {}: {}", page, e));
            }
        }

        Vec::new()
    }

    fn request_crawl(&mut self) -> Vec<Command> {
        if !self.state.can_crawl() {
            tracing::debug!(
                "Crawl request rejected (view: {}, posts: {}, busy: {})",
                self.state.view,
                self.state.user_posts.len(),
                self.state.is_crawling()
            );
            return Vec::new();
        }
        let Some(username) = self.state.selected_user.as_ref().map(|u| u.username.clone()) else {
            return Vec::new();
        };

        let token = self.issue_token();
        tracing::info!("Requesting crawl for @{}", username);
        self.state.crawl_in_flight = Some(token);

        vec![Command::Crawl {
            token,
            username,
            max_collect_count: self.settings.max_collect_count,
        }]
    }

    fn crawl_completed(
        &mut self,
        token: RequestToken,
        outcome: ApiResult<CrawlResponse>,
    ) -> Vec<Command> {
        if self.state.crawl_in_flight != Some(token) {
            tracing::debug!("Discarding stale crawl result {}", token);
            return Vec::new();
        }
        self.state.crawl_in_flight = None;

        match outcome {
            Ok(response) => {
                tracing::info!(
                    "Crawl finished: {}",
                    response.message.as_deref().unwrap_or("ok")
                );
                self.state.last_error = None;

                let Some(account_id) = self
                    .state
                    .selected_user
                    .as_ref()
                    .and_then(|u| u.social_account_id.clone())
                else {
                    tracing::info!("No linked account to refresh after crawl");
                    return Vec::new();
                };

                let mut commands = Vec::new();
                if let Some(stale) = self.state.pagination.reset() {
                    commands.push(Command::Cancel(stale));
                }
                self.state.user_posts.clear();
                self.state.total_posts = None;
                let settle = self.settings.crawl_settle_delay;
                commands.extend(self.fetch_next_page(account_id, Some(settle)));
                commands
            }
            Err(e) => {
                tracing::warn!("Crawl failed: {}", e);
                self.state.last_error = Some(format!("Crawl failed: {}", e));
                Vec::new()
            }
        }
    }

    // ===== Navigation out =====

    fn back(&mut self) -> Vec<Command> {
        match self.state.view {
            View::Users => Vec::new(),
            View::Post => {
                self.state.selected_post = None;
                self.state.view = View::Profile;
                Vec::new()
            }
            View::Profile => {
                let commands = self.leave_profile();
                self.state.view = View::Users;
                commands
            }
        }
    }

    fn home(&mut self) -> Vec<Command> {
        let mut commands = self.leave_profile();
        if let Some(pending) = self.state.search_in_flight.take() {
            commands.push(Command::Cancel(pending));
        }

        self.state.view = View::Users;
        self.state.search_results.clear();
        self.state.last_query.clear();
        commands
    }

    /// Drops everything owned by the profile and its children
    fn leave_profile(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(stale) = self.state.pagination.reset() {
            commands.push(Command::Cancel(stale));
        }
        if let Some(crawl) = self.state.crawl_in_flight.take() {
            commands.push(Command::Cancel(crawl));
        }

        self.state.selected_post = None;
        self.state.selected_user = None;
        self.state.user_posts.clear();
        self.state.total_posts = None;
        commands
    }
}

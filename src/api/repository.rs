//! Repository trait
//!
//! The navigator never talks HTTP directly; the session calls through this
//! trait so tests can substitute an in-memory repository.

use crate::api::types::{CrawlResponse, InfluencersResponse, PostsResponse};
use crate::ApiResult;
use async_trait::async_trait;

/// Source of influencer and post records
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Searches influencers by name
    async fn search_influencers(&self, query: &str) -> ApiResult<InfluencersResponse>;

    /// Lists one page of posts for a social account
    ///
    /// # Arguments
    ///
    /// * `social_account_id` - Account whose posts are listed
    /// * `page` - 1-based page number
    /// * `limit` - Page size
    async fn list_posts(
        &self,
        social_account_id: &str,
        page: u32,
        limit: u32,
    ) -> ApiResult<PostsResponse>;

    /// Asks the backend to collect fresh posts for a username
    ///
    /// A response with `success: false` is reported as
    /// [`crate::ApiError::Rejected`].
    async fn trigger_crawl(&self, username: &str, max_collect_count: u32)
        -> ApiResult<CrawlResponse>;
}

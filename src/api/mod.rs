//! Content API module
//!
//! This module contains everything needed to talk to the content backend:
//! - Wire types for influencers, posts and crawl requests
//! - The `ContentRepository` trait the session calls through
//! - `HttpRepository`, the reqwest-backed implementation

mod client;
mod repository;
pub mod types;

pub use client::{build_http_client, HttpRepository};
pub use repository::ContentRepository;
pub use types::{
    Account, ApiMeta, ApiPost, CrawlRequest, CrawlResponse, Influencer, InfluencersResponse,
    PostsResponse, Social,
};

use crate::api::{CrawlResponse, InfluencersResponse, PostsResponse};
use crate::ApiResult;
use std::fmt;
use std::time::Duration;

/// Identifies one asynchronous request
///
/// Completions carry the token they were issued with; the navigator drops any
/// completion whose token is no longer the current one for its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(pub(crate) u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything that can change the view state
#[derive(Debug)]
pub enum Intent {
    // ===== User intents =====
    /// Submit a search from the users view
    Search(String),

    /// Open a user from the search results by id
    SelectUser(String),

    /// Open a post from the profile list by id
    SelectPost(String),

    /// Go up one level
    Back,

    /// Reset to an empty users view
    Home,

    /// The end of the post list came into view
    NearEnd,

    /// The post list was scrolled to `position` (0-based)
    Scrolled { position: usize },

    /// Ask the backend to crawl the selected user
    RequestCrawl,

    // ===== Completions =====
    SearchCompleted {
        token: RequestToken,
        query: String,
        outcome: ApiResult<InfluencersResponse>,
    },

    PageLoaded {
        token: RequestToken,
        page: u32,
        outcome: ApiResult<PostsResponse>,
    },

    CrawlCompleted {
        token: RequestToken,
        outcome: ApiResult<CrawlResponse>,
    },
}

impl Intent {
    /// The request a completion belongs to; None for user intents
    pub fn token(&self) -> Option<RequestToken> {
        match self {
            Self::SearchCompleted { token, .. }
            | Self::PageLoaded { token, .. }
            | Self::CrawlCompleted { token, .. } => Some(*token),
            _ => None,
        }
    }
}

/// Side effect requested by the navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search {
        token: RequestToken,
        query: String,
    },

    FetchPosts {
        token: RequestToken,
        account_id: String,
        page: u32,
        limit: u32,
        /// Wait this long before sending the request
        delay: Option<Duration>,
    },

    Crawl {
        token: RequestToken,
        username: String,
        max_collect_count: u32,
    },

    /// Abandon a pending request; its completion will be ignored anyway
    Cancel(RequestToken),
}

impl Command {
    pub fn token(&self) -> RequestToken {
        match self {
            Self::Search { token, .. }
            | Self::FetchPosts { token, .. }
            | Self::Crawl { token, .. }
            | Self::Cancel(token) => *token,
        }
    }
}

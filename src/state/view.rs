use crate::model::{Post, User};
use crate::state::{Pagination, RequestToken};
use std::fmt;

/// The screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Search box and result list
    Users,
    /// Selected user with their posts
    Profile,
    /// Single post detail
    Post,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => write!(f, "users"),
            Self::Profile => write!(f, "profile"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// Everything the presentation layer needs to draw a frame
///
/// Owned and mutated by [`crate::state::Navigator`] only; everyone else gets
/// a shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub(crate) view: View,
    pub(crate) selected_user: Option<User>,
    pub(crate) selected_post: Option<Post>,
    pub(crate) search_results: Vec<User>,
    pub(crate) user_posts: Vec<Post>,
    pub(crate) pagination: Pagination,
    pub(crate) total_posts: Option<u64>,
    pub(crate) last_query: String,
    pub(crate) search_in_flight: Option<RequestToken>,
    pub(crate) crawl_in_flight: Option<RequestToken>,
    pub(crate) last_error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            view: View::Users,
            selected_user: None,
            selected_post: None,
            search_results: Vec::new(),
            user_posts: Vec::new(),
            pagination: Pagination::new(),
            total_posts: None,
            last_query: String::new(),
            search_in_flight: None,
            crawl_in_flight: None,
            last_error: None,
        }
    }
}

impl ViewState {
    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.selected_user.as_ref()
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.selected_post.as_ref()
    }

    pub fn search_results(&self) -> &[User] {
        &self.search_results
    }

    pub fn user_posts(&self) -> &[Post] {
        &self.user_posts
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    /// Total post count reported by the API for the selected user
    pub fn total_posts(&self) -> Option<u64> {
        self.total_posts
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn is_searching(&self) -> bool {
        self.search_in_flight.is_some()
    }

    pub fn is_loading_posts(&self) -> bool {
        self.pagination.is_loading()
    }

    /// Busy flag for the crawl action
    pub fn is_crawling(&self) -> bool {
        self.crawl_in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns true if the crawl action is currently offered
    pub fn can_crawl(&self) -> bool {
        self.view == View::Profile
            && self.selected_user.is_some()
            && self.user_posts.is_empty()
            && !self.is_loading_posts()
            && !self.is_crawling()
    }

    /// Checks the structural invariants between view and selection
    ///
    /// Profile needs a selected user; post needs both a user and a post, and
    /// every listed post must belong to the selected user.
    pub fn is_consistent(&self) -> bool {
        let selection_ok = match self.view {
            View::Users => self.selected_user.is_none() && self.selected_post.is_none(),
            View::Profile => self.selected_user.is_some() && self.selected_post.is_none(),
            View::Post => self.selected_user.is_some() && self.selected_post.is_some(),
        };

        let owner_ok = match &self.selected_user {
            Some(user) => self.user_posts.iter().all(|p| p.user_id == user.id),
            None => self.user_posts.is_empty(),
        };

        selection_ok && owner_ok
    }
}

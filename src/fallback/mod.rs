//! Search failure recovery
//!
//! When a search request fails the navigator asks [`Fallback`] what to show
//! instead. The policy is chosen in configuration and is always paired with a
//! visible error message, so a degraded result set never hides an outage.

mod sample;

pub use sample::{is_sample_id, sample_posts_for, sample_users};

use crate::config::FallbackPolicy;
use crate::model::{Post, User};
use std::collections::HashMap;

/// Fallback policy plus the state it needs
#[derive(Debug, Clone)]
pub struct Fallback {
    policy: FallbackPolicy,

    /// Last successful results, keyed by normalized query
    cache: HashMap<String, Vec<User>>,
}

impl Fallback {
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            policy,
            cache: HashMap::new(),
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Records results of a successful search
    pub fn remember(&mut self, query: &str, results: &[User]) {
        if self.policy == FallbackPolicy::Cached {
            self.cache.insert(normalize(query), results.to_vec());
        }
    }

    /// Results to show after a failed search
    pub fn recover_search(&self, query: &str) -> Vec<User> {
        match self.policy {
            FallbackPolicy::None => Vec::new(),
            FallbackPolicy::Cached => self.cache.get(&normalize(query)).cloned().unwrap_or_default(),
            FallbackPolicy::Sample => {
                let needle = normalize(query);
                sample_users()
                    .into_iter()
                    .filter(|u| {
                        needle.is_empty()
                            || u.name.to_lowercase().contains(&needle)
                            || u.username.contains(&needle)
                    })
                    .collect()
            }
        }
    }

    /// Posts for a user that has no linked account
    ///
    /// Only sample users under the sample policy have any.
    pub fn posts_for_unlinked(&self, user: &User) -> Vec<Post> {
        if self.policy == FallbackPolicy::Sample && is_sample_id(&user.id) {
            sample_posts_for(&user.id)
        } else {
            Vec::new()
        }
    }

    /// Short description used in error messages
    pub fn describe(&self) -> &'static str {
        match self.policy {
            FallbackPolicy::None => "no results shown",
            FallbackPolicy::Cached => "showing cached results",
            FallbackPolicy::Sample => "showing sample profiles",
        }
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

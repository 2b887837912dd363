use std::fmt;

/// How an influencer's avatar is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// Up to two uppercase initials derived from the name
    Initials(String),
    /// Remote image
    Image(String),
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initials(initials) => write!(f, "{}", initials),
            Self::Image(url) => write!(f, "{}", url),
        }
    }
}

/// An influencer as shown in search results and on the profile view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub bio: String,
    pub avatar: Avatar,
    pub followers: u64,
    pub following: u64,

    /// Linked social account, required to list posts
    pub social_account_id: Option<String>,
}

impl User {
    /// Returns true if posts can be listed for this user
    pub fn has_linked_account(&self) -> bool {
        self.social_account_id.is_some()
    }
}

use std::fmt;

/// Kind of media attached to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// Media descriptor for a downloaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub kind: MediaKind,
    pub url: String,
    pub thumbnail: Option<String>,
}

/// A single content item owned by a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,

    /// Owning user's id
    pub user_id: String,

    /// Content truncated for list display
    pub title: String,

    /// Longer truncation of the content used as a card teaser
    pub excerpt: String,

    pub content: String,

    /// ISO-8601 date or timestamp
    pub created_at: String,

    /// None for text-only posts
    pub media: Option<Media>,
}

/// Rendering layout selected from a post's media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostLayout {
    Video,
    Image,
    Text,
}

impl Post {
    pub fn layout(&self) -> PostLayout {
        match self.media.as_ref().map(|m| m.kind) {
            Some(MediaKind::Video) => PostLayout::Video,
            Some(MediaKind::Image) => PostLayout::Image,
            None => PostLayout::Text,
        }
    }

    /// Splits the content into display paragraphs on blank lines
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

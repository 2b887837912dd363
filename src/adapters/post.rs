use crate::adapters::text::{truncate_with_ellipsis, EXCERPT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::api::ApiPost;
use crate::config::MediaConfig;
use crate::model::{Media, MediaKind, Post};

/// Builds public media URLs from repository file paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLocator {
    base_url: String,
    strip_prefix: String,
}

impl MediaLocator {
    pub fn new(base_url: &str, strip_prefix: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            strip_prefix: strip_prefix.trim_matches('/').to_string(),
        }
    }

    /// Joins the base URL with a file path
    ///
    /// Leading `./` and `/` are removed, then the configured storage prefix.
    /// Returns None for a path that is empty after stripping.
    pub fn url_for(&self, file_path: &str) -> Option<String> {
        let mut path = file_path.trim();
        while let Some(rest) = path.strip_prefix("./") {
            path = rest;
        }
        path = path.trim_start_matches('/');

        if !self.strip_prefix.is_empty() {
            if let Some(rest) = path.strip_prefix(self.strip_prefix.as_str()) {
                if rest.is_empty() || rest.starts_with('/') {
                    path = rest.trim_start_matches('/');
                }
            }
        }

        if path.is_empty() {
            None
        } else {
            Some(format!("{}/{}", self.base_url, path))
        }
    }
}

impl From<&MediaConfig> for MediaLocator {
    fn from(config: &MediaConfig) -> Self {
        Self::new(&config.base_url, &config.strip_prefix)
    }
}

/// Maps a repository post onto the post view model
///
/// # Arguments
///
/// * `post` - The repository record
/// * `user_id` - Id of the user the post is shown under
/// * `media` - Locator for downloaded files
///
/// Media is attached only for downloaded posts with a usable file path, and
/// downloaded files are always video.
pub fn map_api_post_to_post(post: &ApiPost, user_id: &str, media: &MediaLocator) -> Post {
    let media = if post.is_downloaded {
        post.file_path
            .as_deref()
            .and_then(|path| media.url_for(path))
            .map(|url| Media {
                kind: MediaKind::Video,
                url,
                thumbnail: None,
            })
    } else {
        None
    };

    let created_at = if post.posted_at.is_empty() {
        post.created_at.clone()
    } else {
        post.posted_at.clone()
    };

    Post {
        id: post.id.clone(),
        user_id: user_id.to_string(),
        title: truncate_with_ellipsis(&post.title, TITLE_MAX_CHARS),
        excerpt: truncate_with_ellipsis(&post.title, EXCERPT_MAX_CHARS),
        content: post.title.clone(),
        created_at,
        media,
    }
}

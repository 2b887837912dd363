//! Data adapters
//!
//! Pure functions that turn repository records into view models. Nothing in
//! here fails: missing or malformed optional fields are defaulted.

mod post;
mod text;
mod user;

pub use post::{map_api_post_to_post, MediaLocator};
pub use text::{
    initials, parse_count, slugify, truncate_with_ellipsis, EXCERPT_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use user::map_influencer_to_user;

//! View models
//!
//! These are the application's own representations of influencers and posts,
//! produced from repository records by [`crate::adapters`] and consumed by the
//! navigator and the renderer.

mod post;
mod user;

pub use post::{Media, MediaKind, Post, PostLayout};
pub use user::{Avatar, User};

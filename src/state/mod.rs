//! View state and navigation
//!
//! # Components
//!
//! - `Navigator`: reducer-style owner of the view state; turns intents into
//!   state changes and commands
//! - `ViewState`: read-only snapshot handed to the presentation layer
//! - `Pagination`: page cursor, "more available" flag and in-flight token
//! - `Intent` / `Command`: the inputs and side effects of the navigator

mod intent;
mod navigator;
mod pagination;
mod view;

// Re-export main types
pub use intent::{Command, Intent, RequestToken};
pub use navigator::{Navigator, NavigatorSettings};
pub use pagination::{Pagination, PAGE_SIZE};
pub use view::{View, ViewState};

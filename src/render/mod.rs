//! Text presentation
//!
//! Renders read-only view state snapshots for the terminal front end.

mod format;
mod screen;

pub use format::{format_count, format_long_date, format_short_date};
pub use screen::Screen;

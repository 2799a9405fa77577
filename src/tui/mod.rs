//! Terminal User Interface for commenttree.
//!
//! Two panels side by side:
//! - Left: the comment tree (all roots, or one thread)
//! - Right: search results
//!
//! plus an input line for search, new comments and replies, and a status bar.
//! Built with ratatui; runs on a single-threaded tokio runtime so backend
//! requests and key presses are handled on one thread.

mod app;
mod components;
mod events;
mod state;
mod theme;

pub use app::run;
pub use theme::{available_themes, Theme};

//! commenttree: terminal client for threaded comment trees.
//!
//! The comment service stores comments as a forest: every comment has a
//! parent, top-level comments hang off the virtual parent `0`. This crate is
//! the client side of that service. It lists, searches, posts and deletes
//! comments, and keeps a small amount of view state (which thread is open,
//! which comment is highlighted, which order is used) consistent while
//! requests come and go.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use commenttree::api::HttpClient;
//! use commenttree::config::ServerConfig;
//! use commenttree::model::SortOrder;
//! use commenttree::navigation::{settle, Action, Navigator, NavigatorOptions};
//! use commenttree::render::{render_tree, tree_to_text, Glyphs, ReplyDrafts};
//!
//! # async fn demo() -> commenttree::Result<()> {
//! let client = HttpClient::new(&ServerConfig::default())?;
//! let mut nav = Navigator::new(SortOrder::CreatedDesc, NavigatorOptions::default());
//!
//! settle(&mut nav, &client, Action::LoadRoots).await;
//!
//! let rendered = render_tree(nav.tree().nodes(), nav.view(), &ReplyDrafts::new());
//! print!("{}", tree_to_text(&rendered, Glyphs::UNICODE));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`api`]: the six backend operations, over HTTP or anything else
//! - [`model`]: comment nodes, search hits, paths and paging envelopes
//! - [`view`]: what the tree panel shows, plus status messages
//! - [`navigation`]: the state machine turning user intents into requests
//! - [`render`]: pure tree and search renderers, per-row actions, reply drafts
//! - [`cli`]: command-line interface
//! - [`tui`]: terminal user interface
//! - [`config`]: configuration management
//! - [`error`]: error types and exit codes

#![doc(html_root_url = "https://docs.rs/commenttree/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod render;
pub mod tui;
pub mod util;
pub mod view;

// Re-export commonly used types at the crate root
pub use error::{CommentTreeError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::api::{CommentApi, HttpClient};
    pub use crate::error::{CommentTreeError, Result};
    pub use crate::model::{CommentId, CommentNode, SearchHit, SortOrder};
    pub use crate::navigation::{settle, Action, Navigator, NavigatorOptions};
    pub use crate::render::{render_results, render_tree, ReplyDrafts};
    pub use crate::view::{Status, ViewState};
}

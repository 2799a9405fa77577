//! Pure renderers.
//!
//! Everything here turns fetched data plus view state into plain row
//! structures. Nothing draws to the terminal; the TUI and the CLI text
//! output both consume these rows.

pub mod affordance;
pub mod drafts;
pub mod search;
pub mod text;
pub mod tree;

pub use affordance::{Affordance, Invocation};
pub use drafts::{ReplyDraft, ReplyDrafts};
pub use search::{format_rank, render_results, HitRow, RenderedResults, NO_RESULTS, SEARCH_PROMPT};
pub use text::{results_to_text, tree_to_text, Glyphs};
pub use tree::{render_tree, RenderedTree, TreeRow, EMPTY_TREE_PLACEHOLDER};

use chrono::{DateTime, Utc};

/// Format a timestamp for display (UTC, minute precision).
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

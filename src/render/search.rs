//! Search result rendering.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::CommentId;
use crate::navigation::SearchContent;

/// Shown before any search has run.
pub const SEARCH_PROMPT: &str = "Enter a query.";

/// Shown when a search matched nothing.
pub const NO_RESULTS: &str = "Nothing found.";

/// One rendered search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitRow {
    /// Matching comment id.
    pub id: CommentId,
    /// Parent of the matching comment.
    pub parent_id: CommentId,
    /// Backend excerpt, verbatim.
    pub snippet: String,
    /// Rank with three decimals.
    pub rank: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Rendered search panel.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedResults {
    /// No search yet; show [`SEARCH_PROMPT`].
    Prompt,
    /// A search matched nothing; show [`NO_RESULTS`].
    NoResults {
        /// The query that was run.
        query: String,
    },
    /// Hits in backend rank order.
    Hits {
        /// The query that was run.
        query: String,
        /// One row per hit.
        items: Vec<HitRow>,
        /// Total matches reported by the backend.
        total: u64,
    },
}

impl RenderedResults {
    /// Hit rows, empty unless there are hits.
    #[must_use]
    pub fn items(&self) -> &[HitRow] {
        match self {
            Self::Hits { items, .. } => items,
            _ => &[],
        }
    }
}

/// Format a rank for display: fixed three decimals.
#[must_use]
pub fn format_rank(rank: f64) -> String {
    format!("{rank:.3}")
}

/// Render the search panel.
#[must_use]
pub fn render_results(content: &SearchContent) -> RenderedResults {
    match content {
        SearchContent::Prompt => RenderedResults::Prompt,
        SearchContent::Results { query, hits, .. } if hits.is_empty() => RenderedResults::NoResults {
            query: query.clone(),
        },
        SearchContent::Results { query, hits, total } => RenderedResults::Hits {
            query: query.clone(),
            items: hits
                .iter()
                .map(|hit| HitRow {
                    id: hit.id,
                    parent_id: hit.parent_id,
                    snippet: hit.snippet.clone(),
                    rank: format_rank(hit.rank),
                    created_at: hit.created_at,
                })
                .collect(),
            total: *total,
        },
    }
}

//! Data model for the comment backend.
//!
//! These types mirror the JSON bodies exchanged with the comment service:
//! tree nodes with nested children, flat search hits, ancestor paths and the
//! paging envelopes around them.

pub mod comment;
pub mod path;
pub mod search;
pub mod tree;

pub use comment::*;
pub use path::*;
pub use search::*;
pub use tree::{DepthFirstIterator, NodeVisit};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a comment. Root comments have parent id [`ROOT_PARENT_ID`].
pub type CommentId = i64;

/// Virtual parent of every top-level comment.
pub const ROOT_PARENT_ID: CommentId = 0;

/// Ordering requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Newest comments first (backend default for trees).
    #[default]
    #[serde(rename = "created_at_desc")]
    CreatedDesc,
    /// Oldest comments first.
    #[serde(rename = "created_at_asc")]
    CreatedAsc,
    /// Best full-text rank first. Only meaningful for search.
    #[serde(rename = "rank_desc")]
    RankDesc,
}

impl SortOrder {
    /// Orders accepted by the tree endpoints.
    pub const TREE_ORDERS: [SortOrder; 2] = [SortOrder::CreatedDesc, SortOrder::CreatedAsc];

    /// Wire value sent in the `sort` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedDesc => "created_at_desc",
            Self::CreatedAsc => "created_at_asc",
            Self::RankDesc => "rank_desc",
        }
    }

    /// Short label for status lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreatedDesc => "newest first",
            Self::CreatedAsc => "oldest first",
            Self::RankDesc => "by rank",
        }
    }

    /// Next tree order, wrapping around. `RankDesc` cycles back to the default.
    #[must_use]
    pub const fn next_tree_order(self) -> Self {
        match self {
            Self::CreatedDesc => Self::CreatedAsc,
            Self::CreatedAsc | Self::RankDesc => Self::CreatedDesc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created_at_desc" | "newest" | "desc" => Ok(Self::CreatedDesc),
            "created_at_asc" | "oldest" | "asc" => Ok(Self::CreatedAsc),
            "rank_desc" | "rank" => Ok(Self::RankDesc),
            _ => Err(format!("unknown sort order: {s}")),
        }
    }
}

/// Deserialize a list that the backend may send as `null`.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

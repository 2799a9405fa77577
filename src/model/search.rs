//! Full-text search results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_empty, CommentId};

/// A ranked search match. Flat: carries no children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Matching comment id.
    pub id: CommentId,
    /// Parent of the matching comment.
    pub parent_id: CommentId,
    /// Backend-formatted excerpt, displayed as-is.
    pub snippet: String,
    /// Relevance score.
    pub rank: f64,
    /// Creation time of the matching comment.
    pub created_at: DateTime<Utc>,
}

/// One page of search hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Hits in rank order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<SearchHit>,
    /// Page number (1-based).
    #[serde(default)]
    pub page: u32,
    /// Page size.
    #[serde(default)]
    pub limit: u32,
    /// Total number of matches across all pages.
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_page() {
        let json = r#"{"items":[{"id":5,"parent_id":2,"snippet":"a <b>foo</b> bar","rank":0.5001,"created_at":"2024-05-01T10:00:00Z"}],"page":1,"limit":20,"total":1}"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].snippet, "a <b>foo</b> bar");
        assert!((page.items[0].rank - 0.5001).abs() < f64::EPSILON);
    }
}

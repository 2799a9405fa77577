//! Ancestor paths.

use serde::{Deserialize, Serialize};

use super::{null_as_empty, CommentId};

/// One ancestor on the way from a root comment down to a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathItem {
    /// Ancestor id.
    pub id: CommentId,
    /// Ancestor's parent id.
    pub parent_id: CommentId,
    /// Ancestor text.
    #[serde(default)]
    pub text: String,
}

/// Ancestors of a comment, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPath {
    /// Path items; `items[0]` is the top-level ancestor.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<PathItem>,
}

impl CommentPath {
    /// Build a path from items.
    #[must_use]
    pub fn new(items: Vec<PathItem>) -> Self {
        Self { items }
    }

    /// Top-level ancestor, if the path is not empty.
    #[must_use]
    pub fn root(&self) -> Option<&PathItem> {
        self.items.first()
    }

    /// Number of items on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_root() {
        let path: CommentPath = serde_json::from_str(
            r#"{"items":[{"id":1,"parent_id":0,"text":"a"},{"id":4,"parent_id":1,"text":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.root().map(|p| p.id), Some(1));
    }

    #[test]
    fn test_empty_path() {
        let path: CommentPath = serde_json::from_str(r#"{"items":null}"#).unwrap();
        assert!(path.is_empty());
        assert!(path.root().is_none());
    }
}

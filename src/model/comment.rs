//! Comments and comment trees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tree::DepthFirstIterator;
use super::{null_as_empty, CommentId, ROOT_PARENT_ID};

/// A single comment as returned by the create endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment id.
    pub id: CommentId,
    /// Parent comment id, `0` for root comments.
    pub parent_id: CommentId,
    /// Comment body.
    pub text: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A comment together with its nested replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    /// Unique comment id.
    pub id: CommentId,
    /// Parent comment id, `0` for root comments.
    pub parent_id: CommentId,
    /// Comment body.
    pub text: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Direct replies in backend order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    /// Create a leaf node.
    pub fn new(id: CommentId, parent_id: CommentId, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            parent_id,
            text: text.into(),
            created_at,
            children: Vec::new(),
        }
    }

    /// Attach a child, builder style.
    #[must_use]
    pub fn with_child(mut self, child: CommentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this is a top-level comment.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }

    /// Depth-first walk over this node and all descendants.
    pub fn iter(&self) -> DepthFirstIterator<'_> {
        DepthFirstIterator::new(std::slice::from_ref(self))
    }

    /// Find a node by id within this subtree.
    #[must_use]
    pub fn find(&self, id: CommentId) -> Option<&CommentNode> {
        self.iter().map(|visit| visit.node).find(|node| node.id == id)
    }

    /// Number of nodes in this subtree, including itself.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        self.iter().count()
    }
}

// Threads can be arbitrarily deep; the derived drop would recurse per level.
impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl From<Comment> for CommentNode {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            parent_id: comment.parent_id,
            text: comment.text,
            created_at: comment.created_at,
            children: Vec::new(),
        }
    }
}

/// One page of top-level comments with their replies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreePage {
    /// Top-level comments.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<CommentNode>,
    /// Page number (1-based).
    #[serde(default)]
    pub page: u32,
    /// Page size.
    #[serde(default)]
    pub limit: u32,
    /// Total number of top-level comments.
    #[serde(default)]
    pub total: u64,
}

/// Outcome of a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    /// Number of comments removed, including descendants.
    pub deleted: u64,
}

/// Request body for comment creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment<'a> {
    /// Parent id, `0` for a root comment.
    pub parent_id: CommentId,
    /// Comment body.
    pub text: &'a str,
}

//! Tree rendering.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::drafts::ReplyDrafts;
use crate::model::{CommentId, CommentNode, DepthFirstIterator};
use crate::view::ViewState;

/// Shown in place of an empty tree.
pub const EMPTY_TREE_PLACEHOLDER: &str = "No comments yet.";

/// One rendered comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeRow {
    /// Comment id.
    pub id: CommentId,
    /// Parent id, `0` for top-level comments.
    pub parent_id: CommentId,
    /// Id of the top-level comment this row descends from.
    pub root_id: CommentId,
    /// Nesting depth, `0` for the displayed top level.
    pub depth: usize,
    /// Comment body.
    pub text: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether this is the highlighted node.
    pub highlighted: bool,
    /// Text of the open reply box under this row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

/// Rendered tree panel.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedTree {
    /// No nodes; show [`EMPTY_TREE_PLACEHOLDER`].
    Empty,
    /// Rows in depth-first order.
    Rows {
        /// One row per node.
        rows: Vec<TreeRow>,
        /// Index of the highlighted row, if it is present.
        highlight_row: Option<usize>,
    },
}

impl RenderedTree {
    /// All rows, empty for [`RenderedTree::Empty`].
    #[must_use]
    pub fn rows(&self) -> &[TreeRow] {
        match self {
            Self::Empty => &[],
            Self::Rows { rows, .. } => rows,
        }
    }

    /// Row index to scroll into the middle of the viewport.
    #[must_use]
    pub fn highlight_row(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Rows { highlight_row, .. } => *highlight_row,
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Render `nodes` depth-first in the order the backend returned them.
///
/// Uses an explicit stack, so depth is bounded only by memory. The highlight
/// id is matched as-is: if no node carries it, nothing is highlighted.
#[must_use]
pub fn render_tree(nodes: &[CommentNode], view: &ViewState, drafts: &ReplyDrafts) -> RenderedTree {
    if nodes.is_empty() {
        return RenderedTree::Empty;
    }

    let mut rows = Vec::new();
    let mut highlight_row = None;
    for visit in DepthFirstIterator::new(nodes) {
        let node = visit.node;
        let highlighted = view.is_highlighted(node.id);
        if highlighted && highlight_row.is_none() {
            highlight_row = Some(rows.len());
        }
        let reply = drafts
            .get(node.id)
            .filter(|d| d.open)
            .map(|d| d.text.clone());
        rows.push(TreeRow {
            id: node.id,
            parent_id: node.parent_id,
            root_id: visit.root_id,
            depth: visit.depth,
            text: node.text.clone(),
            created_at: node.created_at,
            highlighted,
            reply,
        });
    }

    RenderedTree::Rows { rows, highlight_row }
}

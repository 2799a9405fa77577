//! Traversal over comment forests.
//!
//! Trees can be arbitrarily deep, so traversal keeps an explicit stack
//! instead of recursing.

use super::{CommentId, CommentNode};

/// A node reached during traversal.
#[derive(Debug, Clone, Copy)]
pub struct NodeVisit<'a> {
    /// The visited node.
    pub node: &'a CommentNode,
    /// Distance from the top of the forest (0 for the given roots).
    pub depth: usize,
    /// Id of the forest root this node descends from.
    pub root_id: CommentId,
}

/// Iterator over a forest in depth-first pre-order, preserving sibling order.
pub struct DepthFirstIterator<'a> {
    stack: Vec<(&'a CommentNode, usize, CommentId)>,
}

impl<'a> DepthFirstIterator<'a> {
    /// Create a new depth-first iterator over `roots`.
    pub fn new(roots: &'a [CommentNode]) -> Self {
        let stack = roots.iter().rev().map(|n| (n, 0, n.id)).collect();
        Self { stack }
    }
}

impl<'a> Iterator for DepthFirstIterator<'a> {
    type Item = NodeVisit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth, root_id) = self.stack.pop()?;
        // Push children in reverse order so we process them in order
        for child in node.children.iter().rev() {
            self.stack.push((child, depth + 1, root_id));
        }
        Some(NodeVisit { node, depth, root_id })
    }
}

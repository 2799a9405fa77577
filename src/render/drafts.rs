//! Inline reply boxes.
//!
//! Whether a node's reply box is open, and what has been typed into it, is
//! presentation state. It lives here rather than in the view state so that
//! navigation never has to know about half-written replies.

use std::collections::HashMap;

use crate::model::{CommentId, CommentNode, DepthFirstIterator};

/// Reply box state for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyDraft {
    /// Whether the box is shown.
    pub open: bool,
    /// Text typed so far.
    pub text: String,
}

/// Reply boxes keyed by the node they reply to.
#[derive(Debug, Clone, Default)]
pub struct ReplyDrafts {
    drafts: HashMap<CommentId, ReplyDraft>,
}

impl ReplyDrafts {
    /// No open boxes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show or hide the box under `id`. Returns the new visibility.
    ///
    /// Hiding keeps the typed text so reopening restores it.
    pub fn toggle(&mut self, id: CommentId) -> bool {
        let draft = self.drafts.entry(id).or_default();
        draft.open = !draft.open;
        draft.open
    }

    /// Whether the box under `id` is shown.
    #[must_use]
    pub fn is_open(&self, id: CommentId) -> bool {
        self.drafts.get(&id).is_some_and(|d| d.open)
    }

    /// Draft for `id`, if one was ever opened.
    #[must_use]
    pub fn get(&self, id: CommentId) -> Option<&ReplyDraft> {
        self.drafts.get(&id)
    }

    /// Text typed under `id`, empty if none.
    #[must_use]
    pub fn text(&self, id: CommentId) -> &str {
        self.drafts.get(&id).map_or("", |d| d.text.as_str())
    }

    /// Append a character to the box under `id`, opening it if needed.
    pub fn push(&mut self, id: CommentId, ch: char) {
        let draft = self.drafts.entry(id).or_default();
        draft.open = true;
        draft.text.push(ch);
    }

    /// Remove the last character typed under `id`.
    pub fn pop(&mut self, id: CommentId) {
        if let Some(draft) = self.drafts.get_mut(&id) {
            draft.text.pop();
        }
    }

    /// Close the box under `id` and return its text.
    pub fn take(&mut self, id: CommentId) -> String {
        self.drafts.remove(&id).map(|d| d.text).unwrap_or_default()
    }

    /// Forget drafts for nodes no longer present in `nodes`.
    pub fn retain_present(&mut self, nodes: &[CommentNode]) {
        if self.drafts.is_empty() {
            return;
        }
        let present: std::collections::HashSet<CommentId> =
            DepthFirstIterator::new(nodes).map(|v| v.node.id).collect();
        self.drafts.retain(|id, _| present.contains(id));
    }

    /// Number of drafts held, open or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Whether no drafts are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

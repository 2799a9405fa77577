//! Per-row actions.
//!
//! Rendering produces plain data. What a row's controls do is decided here:
//! invoking an [`Affordance`] yields an [`Invocation`] that the terminal layer
//! carries out, either by touching reply drafts, asking for confirmation, or
//! dispatching a navigation action.

use super::drafts::ReplyDrafts;
use crate::model::CommentId;
use crate::navigation::Action;

/// A control attached to a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// Show or hide the inline reply box.
    ToggleReply,
    /// Submit the reply box.
    Reply,
    /// Delete the comment and its replies.
    Delete,
    /// Open a search hit in the tree.
    OpenInTree,
}

/// What the terminal layer should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Flip reply box visibility under a node.
    ToggleReplyBox(CommentId),
    /// Hand an action to the navigator.
    Dispatch(Action),
    /// Ask the user first; dispatch `action` only on confirmation.
    Confirm {
        /// Question to show.
        prompt: String,
        /// Action to run if confirmed.
        action: Action,
    },
}

impl Affordance {
    /// Controls on every tree row.
    pub const TREE_ROW: [Affordance; 3] = [Self::ToggleReply, Self::Reply, Self::Delete];

    /// Controls on every search hit.
    pub const HIT_ROW: [Affordance; 1] = [Self::OpenInTree];

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToggleReply => "reply",
            Self::Reply => "send",
            Self::Delete => "delete",
            Self::OpenInTree => "open in tree",
        }
    }

    /// Resolve this control on the row for comment `id`.
    ///
    /// `Reply` reads the draft without clearing it; the caller clears the
    /// draft once the navigator accepts the action.
    #[must_use]
    pub fn invoke(self, id: CommentId, drafts: &ReplyDrafts) -> Invocation {
        match self {
            Self::ToggleReply => Invocation::ToggleReplyBox(id),
            Self::Reply => Invocation::Dispatch(Action::CreateReply {
                parent_id: id,
                text: drafts.text(id).to_string(),
            }),
            Self::Delete => Invocation::Confirm {
                prompt: format!("Delete comment {id} and all replies?"),
                action: Action::Delete { id },
            },
            Self::OpenInTree => Invocation::Dispatch(Action::JumpToTree { hit_id: id }),
        }
    }
}

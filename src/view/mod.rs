//! View state: what the client is currently showing.
//!
//! [`ViewState`] records the active sort order, which subtree (if any) is
//! displayed and which node is highlighted. Only the navigation layer can
//! change it, and every transition replaces the whole value so no field is
//! ever left over from a previous view.

use std::fmt;

use crate::error::{CommentTreeError, FailureClass};
use crate::model::{CommentId, SortOrder};

/// Which part of the forest is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// All top-level comments.
    Roots,
    /// A single top-level branch.
    Subtree {
        /// Id of the displayed branch root.
        root_id: CommentId,
    },
}

/// Single source of truth for the displayed view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    sort: SortOrder,
    current_root_id: Option<CommentId>,
    highlight_id: Option<CommentId>,
}

impl ViewState {
    /// Start in root listing mode with the given sort order.
    #[must_use]
    pub fn new(sort: SortOrder) -> Self {
        Self {
            sort,
            current_root_id: None,
            highlight_id: None,
        }
    }

    /// Active sort order.
    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Displayed subtree root, `None` in root listing mode.
    #[must_use]
    pub fn current_root_id(&self) -> Option<CommentId> {
        self.current_root_id
    }

    /// Node to highlight, if any.
    ///
    /// Not checked against fetched data; an id missing from the tree simply
    /// highlights nothing.
    #[must_use]
    pub fn highlight_id(&self) -> Option<CommentId> {
        self.highlight_id
    }

    /// Current display mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        match self.current_root_id {
            None => ViewMode::Roots,
            Some(root_id) => ViewMode::Subtree { root_id },
        }
    }

    /// Whether `id` is the highlighted node.
    #[must_use]
    pub fn is_highlighted(&self, id: CommentId) -> bool {
        self.highlight_id == Some(id)
    }

    pub(crate) fn show_roots(&mut self) {
        *self = Self {
            sort: self.sort,
            current_root_id: None,
            highlight_id: None,
        };
    }

    pub(crate) fn open_subtree(&mut self, root_id: CommentId, highlight_id: Option<CommentId>) {
        *self = Self {
            sort: self.sort,
            current_root_id: Some(root_id),
            highlight_id,
        };
    }

    pub(crate) fn set_sort(&mut self, sort: SortOrder) {
        *self = Self {
            sort,
            current_root_id: self.current_root_id,
            highlight_id: self.highlight_id,
        };
    }
}

/// Kind of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// A request is in flight.
    Progress,
    /// An operation finished.
    Success,
    /// An operation failed.
    Failure(FailureClass),
}

/// Transient message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Message kind.
    pub kind: StatusKind,
    /// Text to display.
    pub message: String,
}

impl Status {
    /// A progress message.
    pub fn progress(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Progress,
            message: message.into(),
        }
    }

    /// A success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    /// A failure message for `error`, prefixed with the operation name.
    #[must_use]
    pub fn failure(operation: &str, error: &CommentTreeError) -> Self {
        let message = match error {
            CommentTreeError::PathNotFound { .. } => "Path not found".to_string(),
            CommentTreeError::EmptyText { .. } => error.status_detail(),
            _ => format!("{operation} failed: {}", error.status_detail()),
        };
        Self {
            kind: StatusKind::Failure(error.class()),
            message,
        }
    }

    /// Whether this status reports a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.kind, StatusKind::Failure(_))
    }

    /// Convert a failure status into an error carrying its class.
    #[must_use]
    pub fn into_error(self) -> Option<CommentTreeError> {
        match self.kind {
            StatusKind::Failure(class) => Some(CommentTreeError::Reported {
                class,
                message: self.message,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_root_mode() {
        let view = ViewState::default();
        assert_eq!(view.mode(), ViewMode::Roots);
        assert_eq!(view.sort(), SortOrder::CreatedDesc);
        assert_eq!(view.highlight_id(), None);
    }

    #[test]
    fn test_transitions_replace_whole_state() {
        let mut view = ViewState::new(SortOrder::CreatedAsc);
        view.open_subtree(7, Some(9));
        assert_eq!(view.mode(), ViewMode::Subtree { root_id: 7 });
        assert!(view.is_highlighted(9));
        assert!(!view.is_highlighted(7));

        view.set_sort(SortOrder::CreatedDesc);
        assert_eq!(view.current_root_id(), Some(7));
        assert_eq!(view.highlight_id(), Some(9));

        view.show_roots();
        assert_eq!(view, ViewState::new(SortOrder::CreatedDesc));

        view.open_subtree(3, None);
        assert_eq!(view.highlight_id(), None);
    }

    #[test]
    fn test_failure_status() {
        let status = Status::failure("Delete", &CommentTreeError::backend(500, "boom"));
        assert_eq!(status.message, "Delete failed: boom");
        assert_eq!(status.kind, StatusKind::Failure(FailureClass::Backend));

        let status = Status::failure("Open", &CommentTreeError::PathNotFound { id: 4 });
        assert_eq!(status.message, "Path not found");

        let status = Status::failure("Reply", &CommentTreeError::EmptyText { field: "reply" });
        assert_eq!(status.message, "reply text is empty");

        let err = status.into_error().unwrap();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_non_failure_has_no_error() {
        assert!(Status::success("Deleted: 2").into_error().is_none());
        assert!(!Status::progress("Loading...").is_failure());
    }
}

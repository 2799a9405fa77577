//! Navigation controller.
//!
//! [`Navigator`] owns the [`ViewState`] together with the content fetched for
//! it, and is the only place either changes. It never performs I/O: callers
//! feed it user [`Action`]s and get back [`Effect`]s describing the backend
//! requests to issue. When a request finishes the caller hands the result
//! back as a [`Completion`], which may in turn produce further effects (the
//! reload after a mutation, the subtree fetch after a path lookup).
//!
//! Every effect carries a [`Ticket`]. Tree and search completions older than
//! the latest request of the same kind are dropped when
//! [`NavigatorOptions::discard_stale_responses`] is set, so a slow response
//! can never overwrite a fresher one.

pub mod driver;

pub use driver::{run_to_idle, settle};

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::api::{Request, Response};
use crate::config::ViewConfig;
use crate::error::{CommentTreeError, Result};
use crate::model::{CommentId, CommentNode, SearchHit, SortOrder, ROOT_PARENT_ID};
use crate::view::{Status, StatusKind, ViewMode, ViewState};

/// Identifier of an issued request. Strictly increasing per navigator.
pub type Ticket = u64;

/// Tunables for a [`Navigator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorOptions {
    /// Page size for the root listing.
    pub root_page_size: u32,
    /// Page size for search.
    pub search_page_size: u32,
    /// Drop tree and search responses superseded by a newer request.
    pub discard_stale_responses: bool,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self::from(&ViewConfig::default())
    }
}

impl From<&ViewConfig> for NavigatorOptions {
    fn from(config: &ViewConfig) -> Self {
        Self {
            root_page_size: config.root_page_size,
            search_page_size: config.search_page_size,
            discard_stale_responses: config.discard_stale_responses,
        }
    }
}

/// A user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Show all top-level comments.
    LoadRoots,
    /// Show one branch, optionally highlighting a node in it.
    OpenSubtree {
        /// Branch root.
        root_id: CommentId,
        /// Node to highlight.
        highlight_id: Option<CommentId>,
    },
    /// Refetch whatever is displayed.
    Reload,
    /// Reply to an existing comment.
    CreateReply {
        /// Comment being replied to.
        parent_id: CommentId,
        /// Raw input text; trimmed before sending.
        text: String,
    },
    /// Post a new top-level comment.
    CreateRoot {
        /// Raw input text; trimmed before sending.
        text: String,
    },
    /// Delete a comment and its descendants. Callers confirm first.
    Delete {
        /// Comment to delete.
        id: CommentId,
    },
    /// Switch the tree order and refetch.
    ChangeSort(SortOrder),
    /// Show the branch containing a search hit, with the hit highlighted.
    JumpToTree {
        /// Matching comment.
        hit_id: CommentId,
    },
    /// Run a full-text search.
    Search {
        /// Raw query; trimmed before sending.
        query: String,
    },
    /// Clear search results and return to the root listing.
    ResetSearch,
}

/// Work requested by the navigator.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue `request` and report back with `ticket`.
    Fetch {
        /// Ticket to quote in the [`Completion`].
        ticket: Ticket,
        /// Backend operation to perform.
        request: Request,
    },
}

impl Effect {
    /// Ticket of this effect.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::Fetch { ticket, .. } => *ticket,
        }
    }

    /// Request carried by this effect.
    #[must_use]
    pub fn request(&self) -> &Request {
        match self {
            Self::Fetch { request, .. } => request,
        }
    }
}

/// Outcome of an [`Effect`].
#[derive(Debug)]
pub struct Completion {
    /// Ticket of the effect that finished.
    pub ticket: Ticket,
    /// Backend result.
    pub result: Result<Response>,
}

impl Completion {
    /// Pair a result with its ticket.
    #[must_use]
    pub fn new(ticket: Ticket, result: Result<Response>) -> Self {
        Self { ticket, result }
    }
}

/// Fetched tree content.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TreeContent {
    /// Nothing fetched yet.
    #[default]
    NotLoaded,
    /// Top-level nodes of the current view: all roots, or the one open branch.
    Loaded(Vec<CommentNode>),
}

impl TreeContent {
    /// Loaded nodes, empty when nothing is loaded.
    #[must_use]
    pub fn nodes(&self) -> &[CommentNode] {
        match self {
            Self::NotLoaded => &[],
            Self::Loaded(nodes) => nodes,
        }
    }
}

/// Search panel content.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchContent {
    /// No search has run.
    #[default]
    Prompt,
    /// Hits for the last query.
    Results {
        /// Query that produced the hits.
        query: String,
        /// Hits in rank order.
        hits: Vec<SearchHit>,
        /// Total matches reported by the backend.
        total: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Tree,
    Search { query: String },
    CreateReply,
    CreateRoot,
    Delete { id: CommentId },
    Path { hit_id: CommentId },
}

impl Pending {
    const fn operation(&self) -> &'static str {
        match self {
            Self::Tree => "Load",
            Self::Search { .. } => "Search",
            Self::CreateReply => "Reply",
            Self::CreateRoot => "Post",
            Self::Delete { .. } => "Delete",
            Self::Path { .. } => "Open",
        }
    }
}

/// The navigation state machine.
#[derive(Debug)]
pub struct Navigator {
    view: ViewState,
    tree: TreeContent,
    search: SearchContent,
    status: Option<Status>,
    // Ticket whose completion clears the current progress status.
    status_ticket: Option<Ticket>,
    pending: HashMap<Ticket, Pending>,
    next_ticket: Ticket,
    latest_tree: Ticket,
    latest_search: Ticket,
    options: NavigatorOptions,
}

impl Navigator {
    /// Create a navigator in root listing mode. Nothing is fetched until the
    /// first [`Action`].
    #[must_use]
    pub fn new(sort: SortOrder, options: NavigatorOptions) -> Self {
        Self {
            view: ViewState::new(sort),
            tree: TreeContent::NotLoaded,
            search: SearchContent::Prompt,
            status: None,
            status_ticket: None,
            pending: HashMap::new(),
            next_ticket: 1,
            latest_tree: 0,
            latest_search: 0,
            options,
        }
    }

    /// Current view state.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Tree content for the current view.
    #[must_use]
    pub fn tree(&self) -> &TreeContent {
        &self.tree
    }

    /// Search panel content.
    #[must_use]
    pub fn search(&self) -> &SearchContent {
        &self.search
    }

    /// Status line message, if any.
    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    /// Number of requests awaiting completion.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Whether no request is outstanding.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop the status message.
    pub fn clear_status(&mut self) {
        self.set_status(None);
    }

    /// Apply a user action.
    #[instrument(skip(self), level = "debug")]
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::LoadRoots => {
                self.view.show_roots();
                vec![self.fetch_tree(true)]
            }
            Action::OpenSubtree { root_id, highlight_id } => {
                self.view.open_subtree(root_id, highlight_id);
                vec![self.fetch_tree(true)]
            }
            Action::Reload => vec![self.fetch_tree(true)],
            Action::CreateReply { parent_id, text } => {
                self.create(parent_id, &text, Pending::CreateReply, "reply")
            }
            Action::CreateRoot { text } => {
                self.create(ROOT_PARENT_ID, &text, Pending::CreateRoot, "comment")
            }
            Action::Delete { id } => {
                let effect = self.issue(Pending::Delete { id }, Request::Delete { id });
                self.set_progress("Deleting...", effect.ticket());
                vec![effect]
            }
            Action::ChangeSort(sort) => {
                if !SortOrder::TREE_ORDERS.contains(&sort) {
                    self.set_status(Some(Status::failure(
                        "Sort",
                        &CommentTreeError::InvalidArgument {
                            name: "sort".to_string(),
                            reason: format!("{sort} only applies to search"),
                        },
                    )));
                    return Vec::new();
                }
                self.view.set_sort(sort);
                vec![self.fetch_tree(true)]
            }
            Action::JumpToTree { hit_id } => {
                let effect = self.issue(Pending::Path { hit_id }, Request::Path { id: hit_id });
                self.set_progress("Locating...", effect.ticket());
                vec![effect]
            }
            Action::Search { query } => {
                let query = query.trim();
                if query.is_empty() {
                    self.search = SearchContent::Prompt;
                    // Orphan any in-flight search so it cannot replace the prompt.
                    self.latest_search = self.next_ticket;
                    self.set_status(None);
                    return Vec::new();
                }
                let effect = self.issue(
                    Pending::Search {
                        query: query.to_string(),
                    },
                    Request::Search {
                        query: query.to_string(),
                        page: 1,
                        limit: self.options.search_page_size,
                        sort: SortOrder::RankDesc,
                    },
                );
                self.latest_search = effect.ticket();
                self.set_progress("Searching...", effect.ticket());
                vec![effect]
            }
            Action::ResetSearch => {
                self.search = SearchContent::Prompt;
                self.latest_search = self.next_ticket;
                self.view.show_roots();
                vec![self.fetch_tree(true)]
            }
        }
    }

    /// Apply the result of a previously returned effect.
    #[instrument(skip(self, completion), fields(ticket = completion.ticket), level = "debug")]
    pub fn complete(&mut self, completion: Completion) -> Vec<Effect> {
        let Completion { ticket, result } = completion;
        let Some(pending) = self.pending.remove(&ticket) else {
            warn!(ticket, "completion for unknown ticket ignored");
            return Vec::new();
        };

        if self.is_stale(&pending, ticket) {
            debug!(ticket, ?pending, "discarding stale response");
            if self.status_ticket == Some(ticket) {
                self.set_status(None);
            }
            return Vec::new();
        }

        let response = match result {
            Ok(response) => response,
            Err(error) => {
                warn!(ticket, operation = pending.operation(), error = %error, "request failed");
                self.set_status(Some(Status::failure(pending.operation(), &error)));
                return Vec::new();
            }
        };

        match (pending, response) {
            (Pending::Tree, Response::Roots(page)) => {
                self.tree = TreeContent::Loaded(page.items);
                self.settle_progress(ticket);
                Vec::new()
            }
            (Pending::Tree, Response::Subtree(node)) => {
                self.tree = TreeContent::Loaded(vec![node]);
                self.settle_progress(ticket);
                Vec::new()
            }
            (Pending::Search { query }, Response::Found(page)) => {
                let total = page.total;
                self.search = SearchContent::Results {
                    query,
                    hits: page.items,
                    total,
                };
                self.set_status(Some(Status::success(format!("Found: {total}"))));
                Vec::new()
            }
            (Pending::CreateReply, Response::Created(_)) => {
                self.set_status(Some(Status::success("Reply added")));
                vec![self.fetch_tree(false)]
            }
            (Pending::CreateRoot, Response::Created(_)) => {
                self.set_status(Some(Status::success("Comment added")));
                self.view.show_roots();
                vec![self.fetch_tree(false)]
            }
            (Pending::Delete { id }, Response::Deleted(result)) => {
                self.set_status(Some(Status::success(format!("Deleted: {}", result.deleted))));
                if self.view.current_root_id() == Some(id) {
                    self.view.show_roots();
                }
                vec![self.fetch_tree(false)]
            }
            (Pending::Path { hit_id }, Response::Path(path)) => match path.root() {
                None => {
                    self.set_status(Some(Status::failure(
                        "Open",
                        &CommentTreeError::PathNotFound { id: hit_id },
                    )));
                    Vec::new()
                }
                Some(root) => {
                    self.view.open_subtree(root.id, Some(hit_id));
                    vec![self.fetch_tree(true)]
                }
            },
            (pending, response) => {
                warn!(ticket, ?pending, ?response, "response does not match request");
                Vec::new()
            }
        }
    }

    fn create(&mut self, parent_id: CommentId, text: &str, pending: Pending, field: &'static str) -> Vec<Effect> {
        let text = text.trim();
        if text.is_empty() {
            self.set_status(Some(Status::failure(
                pending.operation(),
                &CommentTreeError::EmptyText { field },
            )));
            return Vec::new();
        }
        let effect = self.issue(
            pending,
            Request::Create {
                parent_id,
                text: text.to_string(),
            },
        );
        self.set_progress("Posting...", effect.ticket());
        vec![effect]
    }

    /// Fetch whatever the view currently describes.
    fn fetch_tree(&mut self, announce: bool) -> Effect {
        let sort = self.view.sort();
        let request = match self.view.mode() {
            ViewMode::Roots => Request::ListRoots {
                page: 1,
                limit: self.options.root_page_size,
                sort,
            },
            ViewMode::Subtree { root_id } => Request::Subtree { id: root_id, sort },
        };
        let effect = self.issue(Pending::Tree, request);
        self.latest_tree = effect.ticket();
        if announce {
            self.set_progress("Loading...", effect.ticket());
        }
        effect
    }

    fn issue(&mut self, pending: Pending, request: Request) -> Effect {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.insert(ticket, pending);
        debug!(ticket, request = request.name(), "issuing request");
        Effect::Fetch { ticket, request }
    }

    fn is_stale(&self, pending: &Pending, ticket: Ticket) -> bool {
        if !self.options.discard_stale_responses {
            return false;
        }
        match pending {
            Pending::Tree => ticket < self.latest_tree,
            Pending::Search { .. } => ticket < self.latest_search,
            _ => false,
        }
    }

    fn set_progress(&mut self, message: &str, ticket: Ticket) {
        self.status = Some(Status::progress(message));
        self.status_ticket = Some(ticket);
    }

    fn set_status(&mut self, status: Option<Status>) {
        self.status = status;
        self.status_ticket = None;
    }

    /// Clear the progress message if `ticket` announced it.
    fn settle_progress(&mut self, ticket: Ticket) {
        if self.status_ticket == Some(ticket)
            && matches!(self.status.as_ref().map(|s| s.kind), Some(StatusKind::Progress))
        {
            self.set_status(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{CommentPath, DeleteResult, PathItem, SearchPage, TreePage};

    fn nav() -> Navigator {
        Navigator::new(SortOrder::CreatedDesc, NavigatorOptions::default())
    }

    fn node(id: CommentId, parent: CommentId) -> CommentNode {
        CommentNode::new(id, parent, format!("comment {id}"), Utc::now())
    }

    fn single(effects: Vec<Effect>) -> (Ticket, Request) {
        assert_eq!(effects.len(), 1, "expected exactly one effect: {effects:?}");
        match effects.into_iter().next() {
            Some(Effect::Fetch { ticket, request }) => (ticket, request),
            None => unreachable!(),
        }
    }

    fn roots(items: Vec<CommentNode>) -> Result<Response> {
        Ok(Response::Roots(TreePage {
            total: items.len() as u64,
            items,
            page: 1,
            limit: 50,
        }))
    }

    #[test]
    fn test_load_roots_requests_first_page() {
        let mut nav = nav();
        let (ticket, request) = single(nav.dispatch(Action::LoadRoots));
        assert_eq!(
            request,
            Request::ListRoots {
                page: 1,
                limit: 50,
                sort: SortOrder::CreatedDesc
            }
        );
        assert_eq!(nav.status().map(|s| s.kind), Some(StatusKind::Progress));

        assert!(nav.complete(Completion::new(ticket, roots(vec![]))).is_empty());
        assert_eq!(nav.tree(), &TreeContent::Loaded(vec![]));
        assert_eq!(nav.status(), None);
        assert!(nav.is_idle());
    }

    #[test]
    fn test_replacing_a_deep_tree() {
        let depth = 100_000;
        let chain = || {
            let mut chain = node(depth, depth - 1);
            for id in (1..depth).rev() {
                chain = node(id, id - 1).with_child(chain);
            }
            chain
        };

        let mut nav = nav();
        for _ in 0..2 {
            let (ticket, _) = single(nav.dispatch(Action::Reload));
            assert!(nav.complete(Completion::new(ticket, roots(vec![chain()]))).is_empty());
        }
        match nav.tree() {
            TreeContent::Loaded(items) => assert_eq!(items[0].subtree_size(), depth as usize),
            other => panic!("expected a loaded tree, got {other:?}"),
        }
    }

    #[test]
    fn test_tickets_increase() {
        let mut nav = nav();
        let (first, _) = single(nav.dispatch(Action::LoadRoots));
        let (second, _) = single(nav.dispatch(Action::Reload));
        assert!(second > first);
        assert_eq!(nav.in_flight(), 2);
    }

    #[test]
    fn test_empty_text_is_rejected_locally() {
        let mut nav = nav();
        assert!(nav
            .dispatch(Action::CreateReply {
                parent_id: 3,
                text: "  \n\t ".to_string()
            })
            .is_empty());
        let status = nav.status().cloned().unwrap();
        assert_eq!(
            status.kind,
            StatusKind::Failure(crate::error::FailureClass::Validation)
        );

        assert!(nav
            .dispatch(Action::CreateRoot {
                text: String::new()
            })
            .is_empty());
        assert!(nav.is_idle());
    }

    #[test]
    fn test_create_text_is_trimmed() {
        let mut nav = nav();
        let (_, request) = single(nav.dispatch(Action::CreateRoot {
            text: "  hello  ".to_string(),
        }));
        assert_eq!(
            request,
            Request::Create {
                parent_id: 0,
                text: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_reply_reloads_current_subtree_and_keeps_message() {
        let mut nav = nav();
        nav.dispatch(Action::OpenSubtree {
            root_id: 7,
            highlight_id: Some(9),
        });
        let (ticket, _) = single(nav.dispatch(Action::CreateReply {
            parent_id: 9,
            text: "thanks".to_string(),
        }));

        let (reload, request) = single(nav.complete(Completion::new(ticket, Ok(Response::Created(None)))));
        assert_eq!(
            request,
            Request::Subtree {
                id: 7,
                sort: SortOrder::CreatedDesc
            }
        );
        assert_eq!(nav.view().highlight_id(), Some(9));

        nav.complete(Completion::new(reload, Ok(Response::Subtree(node(7, 0)))));
        assert_eq!(nav.status().map(|s| s.message.as_str()), Some("Reply added"));
    }

    #[test]
    fn test_delete_of_displayed_root_returns_to_roots() {
        let mut nav = nav();
        nav.dispatch(Action::OpenSubtree {
            root_id: 7,
            highlight_id: Some(8),
        });
        let (ticket, request) = single(nav.dispatch(Action::Delete { id: 7 }));
        assert_eq!(request, Request::Delete { id: 7 });

        let (_, request) = single(nav.complete(Completion::new(
            ticket,
            Ok(Response::Deleted(DeleteResult { deleted: 4 })),
        )));
        assert!(matches!(request, Request::ListRoots { .. }));
        assert_eq!(nav.view().mode(), ViewMode::Roots);
        assert_eq!(nav.view().highlight_id(), None);
        assert_eq!(nav.status().map(|s| s.message.as_str()), Some("Deleted: 4"));
    }

    #[test]
    fn test_delete_of_other_node_preserves_view() {
        let mut nav = nav();
        nav.dispatch(Action::OpenSubtree {
            root_id: 7,
            highlight_id: Some(8),
        });
        let before = nav.view().clone();
        let (ticket, _) = single(nav.dispatch(Action::Delete { id: 8 }));
        let (_, request) = single(nav.complete(Completion::new(
            ticket,
            Ok(Response::Deleted(DeleteResult { deleted: 1 })),
        )));
        assert_eq!(
            request,
            Request::Subtree {
                id: 7,
                sort: SortOrder::CreatedDesc
            }
        );
        assert_eq!(nav.view(), &before);
    }

    #[test]
    fn test_failed_delete_does_not_reload() {
        let mut nav = nav();
        let (ticket, _) = single(nav.dispatch(Action::Delete { id: 2 }));
        let effects = nav.complete(Completion::new(ticket, Err(CommentTreeError::backend(404, "not found"))));
        assert!(effects.is_empty());
        assert_eq!(
            nav.status().map(|s| s.message.as_str()),
            Some("Delete failed: not found")
        );
    }

    #[test]
    fn test_jump_with_empty_path_reports_not_found() {
        let mut nav = nav();
        nav.dispatch(Action::OpenSubtree {
            root_id: 1,
            highlight_id: None,
        });
        let before = nav.view().clone();
        let (ticket, request) = single(nav.dispatch(Action::JumpToTree { hit_id: 42 }));
        assert_eq!(request, Request::Path { id: 42 });

        let effects = nav.complete(Completion::new(ticket, Ok(Response::Path(CommentPath::default()))));
        assert!(effects.is_empty());
        assert_eq!(nav.view(), &before);
        let status = nav.status().cloned().unwrap();
        assert_eq!(status.message, "Path not found");
        assert_eq!(
            status.kind,
            StatusKind::Failure(crate::error::FailureClass::NotFound)
        );
    }

    #[test]
    fn test_jump_opens_branch_root_with_hit_highlighted() {
        let mut nav = nav();
        let (ticket, _) = single(nav.dispatch(Action::JumpToTree { hit_id: 30 }));
        let path = CommentPath::new(vec![
            PathItem { id: 10, parent_id: 0, text: "a".into() },
            PathItem { id: 20, parent_id: 10, text: "b".into() },
            PathItem { id: 30, parent_id: 20, text: "c".into() },
        ]);
        let (_, request) = single(nav.complete(Completion::new(ticket, Ok(Response::Path(path)))));
        assert_eq!(
            request,
            Request::Subtree {
                id: 10,
                sort: SortOrder::CreatedDesc
            }
        );
        assert_eq!(nav.view().current_root_id(), Some(10));
        assert_eq!(nav.view().highlight_id(), Some(30));
    }

    #[test]
    fn test_sort_change_in_subtree_mode() {
        let mut nav = nav();
        nav.dispatch(Action::OpenSubtree {
            root_id: 7,
            highlight_id: Some(11),
        });
        let (_, request) = single(nav.dispatch(Action::ChangeSort(SortOrder::CreatedAsc)));
        assert_eq!(
            request,
            Request::Subtree {
                id: 7,
                sort: SortOrder::CreatedAsc
            }
        );
        assert_eq!(nav.view().highlight_id(), Some(11));
    }

    #[test]
    fn test_rank_sort_rejected_for_trees() {
        let mut nav = nav();
        assert!(nav.dispatch(Action::ChangeSort(SortOrder::RankDesc)).is_empty());
        assert_eq!(nav.view().sort(), SortOrder::CreatedDesc);
        assert!(nav.status().is_some_and(Status::is_failure));
    }

    #[test]
    fn test_search_flow() {
        let mut nav = nav();
        assert!(nav.dispatch(Action::Search { query: "   ".into() }).is_empty());
        assert_eq!(nav.search(), &SearchContent::Prompt);

        let (ticket, request) = single(nav.dispatch(Action::Search { query: " foo ".into() }));
        assert_eq!(
            request,
            Request::Search {
                query: "foo".into(),
                page: 1,
                limit: 20,
                sort: SortOrder::RankDesc
            }
        );
        nav.complete(Completion::new(
            ticket,
            Ok(Response::Found(SearchPage {
                items: vec![],
                page: 1,
                limit: 20,
                total: 0,
            })),
        ));
        assert_eq!(
            nav.search(),
            &SearchContent::Results {
                query: "foo".into(),
                hits: vec![],
                total: 0
            }
        );
        assert_eq!(nav.status().map(|s| s.message.as_str()), Some("Found: 0"));
    }

    #[test]
    fn test_stale_tree_response_is_discarded() {
        let mut nav = nav();
        let (old, _) = single(nav.dispatch(Action::LoadRoots));
        let (new, _) = single(nav.dispatch(Action::OpenSubtree {
            root_id: 5,
            highlight_id: None,
        }));

        nav.complete(Completion::new(new, Ok(Response::Subtree(node(5, 0)))));
        nav.complete(Completion::new(old, roots(vec![node(1, 0), node(2, 0)])));

        let ids: Vec<CommentId> = nav.tree().nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn test_last_arrival_wins_without_discard() {
        let mut nav = Navigator::new(
            SortOrder::CreatedDesc,
            NavigatorOptions {
                discard_stale_responses: false,
                ..NavigatorOptions::default()
            },
        );
        let (old, _) = single(nav.dispatch(Action::LoadRoots));
        let (new, _) = single(nav.dispatch(Action::OpenSubtree {
            root_id: 5,
            highlight_id: None,
        }));

        nav.complete(Completion::new(new, Ok(Response::Subtree(node(5, 0)))));
        nav.complete(Completion::new(old, roots(vec![node(1, 0), node(2, 0)])));

        assert_eq!(nav.tree().nodes().len(), 2);
    }

    #[test]
    fn test_unknown_ticket_ignored() {
        let mut nav = nav();
        assert!(nav.complete(Completion::new(99, roots(vec![]))).is_empty());
        assert_eq!(nav.tree(), &TreeContent::NotLoaded);
    }

    #[test]
    fn test_reset_search_returns_to_roots() {
        let mut nav = nav();
        nav.dispatch(Action::OpenSubtree {
            root_id: 3,
            highlight_id: Some(4),
        });
        let (ticket, _) = single(nav.dispatch(Action::Search { query: "x".into() }));
        let (_, request) = single(nav.dispatch(Action::ResetSearch));
        assert!(matches!(request, Request::ListRoots { .. }));
        assert_eq!(nav.view().mode(), ViewMode::Roots);

        // The search issued before the reset must not repopulate the panel.
        nav.complete(Completion::new(ticket, Ok(Response::Found(SearchPage::default()))));
        assert_eq!(nav.search(), &SearchContent::Prompt);
    }
}

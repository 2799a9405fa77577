//! Client side of the comment backend.
//!
//! [`CommentApi`] is the seam between the navigation controller and the
//! network: [`HttpClient`] implements it over HTTP, tests implement it over an
//! in-memory store. [`Request`] and [`Response`] are the same six operations
//! as data, so the controller can describe work without performing it.

mod http;

pub use http::HttpClient;

use crate::error::Result;
use crate::model::{
    Comment, CommentId, CommentNode, CommentPath, DeleteResult, SearchPage, SortOrder, TreePage,
};

/// The six backend operations.
///
/// Every call is a single request/response; implementations never retry.
#[allow(async_fn_in_trait)]
pub trait CommentApi {
    /// Create a comment under `parent_id` (`0` for a root comment).
    ///
    /// Returns the created comment when the backend echoes one.
    async fn create(&self, parent_id: CommentId, text: &str) -> Result<Option<Comment>>;

    /// Fetch one page of top-level comments with their replies.
    async fn list_root_page(&self, page: u32, limit: u32, sort: SortOrder) -> Result<TreePage>;

    /// Delete a comment and its whole subtree.
    async fn delete(&self, id: CommentId) -> Result<DeleteResult>;

    /// Full-text search.
    async fn search(&self, query: &str, page: u32, limit: u32, sort: SortOrder) -> Result<SearchPage>;

    /// Ancestors of `id`, root first.
    async fn path(&self, id: CommentId) -> Result<CommentPath>;

    /// The subtree rooted at `id`.
    async fn subtree(&self, id: CommentId, sort: SortOrder) -> Result<CommentNode>;
}

/// A backend operation described as data.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// `POST /comments`.
    Create {
        /// Parent id, `0` for a root comment.
        parent_id: CommentId,
        /// Already-trimmed comment text.
        text: String,
    },
    /// `GET /comments?parent=0`.
    ListRoots {
        /// Page number (1-based).
        page: u32,
        /// Page size.
        limit: u32,
        /// Tree order.
        sort: SortOrder,
    },
    /// `DELETE /comments/{id}`.
    Delete {
        /// Comment to delete.
        id: CommentId,
    },
    /// `GET /comments/search`.
    Search {
        /// Query string.
        query: String,
        /// Page number (1-based).
        page: u32,
        /// Page size.
        limit: u32,
        /// Result order.
        sort: SortOrder,
    },
    /// `GET /comments/path`.
    Path {
        /// Comment whose ancestors are requested.
        id: CommentId,
    },
    /// `GET /comments/subtree`.
    Subtree {
        /// Root of the requested subtree.
        id: CommentId,
        /// Tree order.
        sort: SortOrder,
    },
}

impl Request {
    /// Short operation name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::ListRoots { .. } => "list_roots",
            Self::Delete { .. } => "delete",
            Self::Search { .. } => "search",
            Self::Path { .. } => "path",
            Self::Subtree { .. } => "subtree",
        }
    }
}

/// Successful result of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Result of [`Request::Create`].
    Created(Option<Comment>),
    /// Result of [`Request::ListRoots`].
    Roots(TreePage),
    /// Result of [`Request::Delete`].
    Deleted(DeleteResult),
    /// Result of [`Request::Search`].
    Found(SearchPage),
    /// Result of [`Request::Path`].
    Path(CommentPath),
    /// Result of [`Request::Subtree`].
    Subtree(CommentNode),
}

/// Perform `request` against `api`.
pub async fn execute<A: CommentApi>(api: &A, request: &Request) -> Result<Response> {
    match request {
        Request::Create { parent_id, text } => api.create(*parent_id, text).await.map(Response::Created),
        Request::ListRoots { page, limit, sort } => {
            api.list_root_page(*page, *limit, *sort).await.map(Response::Roots)
        }
        Request::Delete { id } => api.delete(*id).await.map(Response::Deleted),
        Request::Search { query, page, limit, sort } => {
            api.search(query, *page, *limit, *sort).await.map(Response::Found)
        }
        Request::Path { id } => api.path(*id).await.map(Response::Path),
        Request::Subtree { id, sort } => api.subtree(*id, *sort).await.map(Response::Subtree),
    }
}

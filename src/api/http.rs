//! HTTP implementation of [`CommentApi`] on top of reqwest.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::CommentApi;
use crate::config::ServerConfig;
use crate::error::{CommentTreeError, Result};
use crate::model::{
    Comment, CommentId, CommentNode, CommentPath, DeleteResult, NewComment, SearchPage, SortOrder,
    TreePage, ROOT_PARENT_ID,
};

/// Error body sent by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Comment backend client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    http: Client,
}

impl HttpClient {
    /// Create a client for the server described by `config`.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CommentTreeError::transport)?;

        Ok(Self::with_client(&config.base_url, http))
    }

    /// Create a client around an existing reqwest client.
    pub fn with_client(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /healthz`; succeeds on any 2xx answer.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<()> {
        let response = self.request(Method::GET, "/healthz").send().await.map_err(CommentTreeError::transport)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.bytes().await.unwrap_or_default();
            Err(failure(status, &body))
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Send a request and read the full body, mapping non-2xx to a backend error.
    async fn send(&self, endpoint: &str, builder: RequestBuilder) -> Result<Vec<u8>> {
        let response = builder.send().await.map_err(|e| {
            warn!(endpoint, error = %e, "request failed");
            CommentTreeError::transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(endpoint, error = %e, "failed to read response body");
            CommentTreeError::transport(e)
        })?;

        if !status.is_success() {
            let err = failure(status, &body);
            debug!(endpoint, status = status.as_u16(), error = %err, "backend returned failure");
            return Err(err);
        }

        debug!(endpoint, status = status.as_u16(), bytes = body.len(), "response received");
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, builder: RequestBuilder) -> Result<T> {
        let body = self.send(endpoint, builder).await?;
        decode(endpoint, &body)
    }
}

/// Convert a non-success response into a backend error.
///
/// The server's `error` string wins; an absent or unparsable body falls back
/// to the numeric status code.
fn failure(status: StatusCode, body: &[u8]) -> CommentTreeError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status.as_u16().to_string());

    CommentTreeError::backend(status.as_u16(), message)
}

/// Decode a success body. Reply trees have no depth limit, so serde_json's
/// recursion guard is off and the stack grows on the heap instead.
fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T> {
    let mut de = serde_json::Deserializer::from_slice(body);
    de.disable_recursion_limit();

    T::deserialize(serde_stacker::Deserializer::new(&mut de))
        .and_then(|value| de.end().map(|()| value))
        .map_err(|source| CommentTreeError::MalformedResponse {
            endpoint: endpoint.to_string(),
            source,
        })
}

impl CommentApi for HttpClient {
    #[instrument(skip(self, text), fields(len = text.len()))]
    async fn create(&self, parent_id: CommentId, text: &str) -> Result<Option<Comment>> {
        let builder = self
            .request(Method::POST, "/comments")
            .json(&NewComment { parent_id, text });
        let body = self.send("POST /comments", builder).await?;

        // Any 2xx is success; the echoed comment is a bonus.
        match serde_json::from_slice::<Comment>(&body) {
            Ok(comment) => Ok(Some(comment)),
            Err(e) => {
                debug!(error = %e, "create response did not contain a comment");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_root_page(&self, page: u32, limit: u32, sort: SortOrder) -> Result<TreePage> {
        let builder = self.request(Method::GET, "/comments").query(&[
            ("parent", ROOT_PARENT_ID.to_string()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
            ("sort", sort.as_str().to_string()),
        ]);
        self.get_json("GET /comments", builder).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CommentId) -> Result<DeleteResult> {
        let builder = self.request(Method::DELETE, &format!("/comments/{id}"));
        self.get_json("DELETE /comments/{id}", builder).await
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, page: u32, limit: u32, sort: SortOrder) -> Result<SearchPage> {
        let builder = self.request(Method::GET, "/comments/search").query(&[
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
            ("sort", sort.as_str().to_string()),
        ]);
        self.get_json("GET /comments/search", builder).await
    }

    #[instrument(skip(self))]
    async fn path(&self, id: CommentId) -> Result<CommentPath> {
        let builder = self
            .request(Method::GET, "/comments/path")
            .query(&[("id", id.to_string())]);
        self.get_json("GET /comments/path", builder).await
    }

    #[instrument(skip(self))]
    async fn subtree(&self, id: CommentId, sort: SortOrder) -> Result<CommentNode> {
        let builder = self
            .request(Method::GET, "/comments/subtree")
            .query(&[("id", id.to_string()), ("sort", sort.as_str().to_string())]);
        self.get_json("GET /comments/subtree", builder).await
    }
}

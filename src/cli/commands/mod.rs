//! CLI command implementations.
//!
//! Each command is implemented in its own module with a `run` function
//! that handles the command logic. The scripted commands drive a
//! [`Navigator`] to completion and then print what it ended up showing.

pub mod config;
pub mod health;
pub mod list;
pub mod post;
pub mod search;
pub mod tui;

use std::future::Future;

use crate::api::HttpClient;
use crate::config::Config;
use crate::error::{CommentTreeError, Result};
use crate::model::SortOrder;
use crate::navigation::{settle, Action, Navigator, NavigatorOptions};

/// Run `future` on a single-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CommentTreeError::io("Failed to start async runtime", e))?;
    Ok(runtime.block_on(future))
}

/// HTTP client for the configured server.
pub fn connect(config: &Config) -> Result<HttpClient> {
    HttpClient::new(&config.server)
}

/// Navigator for `config`, with an optional tree order override.
pub fn navigator(config: &Config, sort: Option<SortOrder>) -> Result<Navigator> {
    let sort = sort.unwrap_or(config.view.sort);
    if sort == SortOrder::RankDesc {
        return Err(CommentTreeError::InvalidArgument {
            name: "sort".to_string(),
            reason: "rank_desc only applies to search".to_string(),
        });
    }
    Ok(Navigator::new(sort, NavigatorOptions::from(&config.view)))
}

/// Dispatch `action` against the configured server and wait until idle.
///
/// A failure left in the status line becomes the command's error.
pub fn run_action(config: &Config, nav: &mut Navigator, action: Action) -> Result<()> {
    let client = connect(config)?;
    block_on(settle(nav, &client, action))?;
    check_status(nav)
}

/// Turn a failure status into an error.
pub fn check_status(nav: &Navigator) -> Result<()> {
    match nav.status().filter(|status| status.is_failure()) {
        Some(status) => Err(status
            .clone()
            .into_error()
            .unwrap_or_else(|| CommentTreeError::unsupported("unclassified failure"))),
        None => Ok(()),
    }
}

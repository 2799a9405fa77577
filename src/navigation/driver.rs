//! Sequential effect execution.
//!
//! The terminal UI runs effects concurrently and feeds completions back as
//! they arrive. Scripted callers (the CLI commands and tests) instead want to
//! run an action to completion; [`settle`] does that by executing effects one
//! at a time in issue order until the navigator is idle.

use std::collections::VecDeque;

use tracing::debug;

use super::{Action, Completion, Effect, Navigator};
use crate::api::{execute, CommentApi};

/// Execute `effects` and everything they lead to, in order.
pub async fn run_to_idle<A: CommentApi>(nav: &mut Navigator, api: &A, effects: Vec<Effect>) {
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        let Effect::Fetch { ticket, request } = effect;
        debug!(ticket, request = request.name(), "executing");
        let result = execute(api, &request).await;
        queue.extend(nav.complete(Completion::new(ticket, result)));
    }
}

/// Dispatch `action` and run it to completion.
pub async fn settle<A: CommentApi>(nav: &mut Navigator, api: &A, action: Action) {
    let effects = nav.dispatch(action);
    run_to_idle(nav, api, effects).await;
}

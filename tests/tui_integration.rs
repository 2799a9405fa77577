//! Integration tests for commenttree interactive features using rust-expect.
//!
//! These tests verify that the TUI and the delete confirmation prompt work
//! by spawning them in a PTY and simulating user interaction. No comment
//! service is running, so every request fails with a network error.
//!
//! Run with: `cargo test --test tui_integration`
//!
//! Note: TUI tests may be skipped in some CI/PTY environments where crossterm
//! cannot properly initialize the terminal event system.

use rust_expect::prelude::*;
use std::time::Duration;

/// Nothing listens on the discard port.
const DEAD_SERVER: &str = "http://127.0.0.1:9";

/// Helper to get the commenttree binary path
fn commenttree_bin() -> &'static str {
    env!("CARGO_BIN_EXE_commenttree")
}

mod tui_tests {
    use super::*;

    /// Test that the TUI launches, renders panels, and reports the failed load.
    #[tokio::test]
    async fn test_tui_launches_and_renders() -> Result<()> {
        let mut session = Session::spawn(commenttree_bin(), &["--server", DEAD_SERVER, "tui"]).await?;

        let result = session
            .expect_timeout(
                Pattern::regex(r"[│─┌┐└┘]|Comments|Load failed|Cannot launch TUI|no interactive terminal").unwrap(),
                Duration::from_secs(5),
            )
            .await;

        match result {
            Ok(m) => {
                if m.matched.contains("Cannot launch TUI") || m.matched.contains("no interactive terminal") {
                    // TUI can't run in this environment - skip gracefully
                    eprintln!("TUI test skipped: terminal not interactive in this environment");
                    return Ok(());
                }
                session.send_str("q").await?;
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            Err(_) => {
                session.send_control(ControlChar::CtrlC).await.ok();
            }
        }

        Ok(())
    }

    /// Test typing into the search line and cancelling it.
    #[tokio::test]
    async fn test_tui_search_input() -> Result<()> {
        let mut session = Session::spawn(commenttree_bin(), &["--server", DEAD_SERVER]).await?;

        let result = session
            .expect_timeout(
                Pattern::regex(r"[│─┌┐└┘]|Cannot launch TUI|no interactive terminal").unwrap(),
                Duration::from_secs(5),
            )
            .await;

        match result {
            Ok(m) => {
                if m.matched.contains("Cannot") || m.matched.contains("no interactive") {
                    eprintln!("TUI search test skipped: terminal not interactive");
                    return Ok(());
                }

                session.send_str("/").await?;
                tokio::time::sleep(Duration::from_millis(100)).await;
                session.send_str("hello").await?;
                tokio::time::sleep(Duration::from_millis(100)).await;

                // Esc leaves the input line, then quit
                session.send(b"\x1b").await?;
                tokio::time::sleep(Duration::from_millis(100)).await;
                session.send_str("q").await?;
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            Err(_) => {
                session.send_control(ControlChar::CtrlC).await.ok();
            }
        }

        Ok(())
    }

    /// Test TUI exits cleanly with 'q'
    #[tokio::test]
    async fn test_tui_quit() -> Result<()> {
        let mut session = Session::spawn(commenttree_bin(), &["--server", DEAD_SERVER, "tui"]).await?;

        let result = session
            .expect_timeout(
                Pattern::regex(r"[│─]|Cannot launch TUI|no interactive terminal").unwrap(),
                Duration::from_secs(5),
            )
            .await;

        match result {
            Ok(m) => {
                if m.matched.contains("Cannot") || m.matched.contains("no interactive") {
                    eprintln!("TUI quit test skipped: terminal not interactive");
                    return Ok(());
                }

                session.send_str("q").await?;

                let wait_result = tokio::time::timeout(Duration::from_secs(2), session.wait()).await;

                assert!(wait_result.is_ok(), "TUI should exit cleanly after 'q' press");
            }
            Err(_) => {
                session.send_control(ControlChar::CtrlC).await.ok();
            }
        }

        Ok(())
    }
}

mod delete_tests {
    use super::*;

    /// Test that `commenttree delete` asks before sending anything.
    #[tokio::test]
    async fn test_delete_asks_for_confirmation() -> Result<()> {
        let mut session = Session::spawn(commenttree_bin(), &["--server", DEAD_SERVER, "delete", "5"]).await?;

        let result = session
            .expect_timeout(
                Pattern::regex(r"Delete comment 5 and all replies\?|not a terminal").unwrap(),
                Duration::from_secs(5),
            )
            .await;

        if let Ok(m) = result {
            if m.matched.contains("Delete comment 5") {
                // Declining never reaches the (dead) server
                session.send_str("n").await?;
                let cancelled = session
                    .expect_timeout(Pattern::regex(r"Cancelled").unwrap(), Duration::from_secs(2))
                    .await;
                assert!(cancelled.is_ok(), "declining should cancel the delete");
            }
        }

        session.send_control(ControlChar::CtrlC).await.ok();
        Ok(())
    }
}

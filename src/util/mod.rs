//! Utility functions shared across the crate:
//! - Atomic file writes for the config file
//! - Display helpers for fitting comment text into terminal cells

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{CommentTreeError, Result};

/// Atomically write content to a file.
///
/// Writes to a temporary file in the same directory, flushes it, then renames
/// it over `path`. If any step fails the original file is left untouched.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, or if writing
/// or persisting the temporary file fails.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let parent = path.parent().ok_or_else(|| CommentTreeError::IoError {
        context: format!("Cannot determine parent directory for: {}", path.display()),
        source: io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"),
    })?;

    if !parent.as_os_str().is_empty() && !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            CommentTreeError::io(format!("Failed to create directory: {}", parent.display()), e)
        })?;
    }

    // Same directory keeps the rename on one filesystem
    let dir = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
        CommentTreeError::io(format!("Failed to create temporary file in: {}", dir.display()), e)
    })?;

    temp_file.write_all(content).map_err(|e| {
        CommentTreeError::io(format!("Failed to write temporary file for: {}", path.display()), e)
    })?;
    temp_file.flush().map_err(|e| {
        CommentTreeError::io(format!("Failed to flush temporary file for: {}", path.display()), e)
    })?;

    temp_file.persist(path).map_err(|e| {
        CommentTreeError::io(format!("Failed to atomically write file: {}", path.display()), e.error)
    })?;

    Ok(())
}

/// Collapse line breaks and tabs so text fits on one terminal row.
#[must_use]
pub fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r', '\t']) {
        Cow::Owned(
            text.split(['\n', '\r', '\t'])
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Truncate to at most `max_chars` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }
    if max_chars == 0 {
        return Cow::Borrowed("");
    }
    let kept: String = text.chars().take(max_chars - 1).collect();
    Cow::Owned(format!("{kept}…"))
}

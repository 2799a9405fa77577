//! Plain-text output for the command line.

use std::fmt::Write;

use super::search::{RenderedResults, NO_RESULTS, SEARCH_PROMPT};
use super::tree::{RenderedTree, EMPTY_TREE_PLACEHOLDER};
use super::format_timestamp;
use crate::util::single_line;

/// Glyphs used to draw the tree.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    branch: &'static str,
    marker: &'static str,
    separator: &'static str,
}

impl Glyphs {
    /// Box-drawing glyphs.
    pub const UNICODE: Self = Self {
        branch: "└ ",
        marker: "▶ ",
        separator: " · ",
    };

    /// ASCII-only glyphs.
    pub const ASCII: Self = Self {
        branch: "\\ ",
        marker: "> ",
        separator: " | ",
    };

    /// Pick a glyph set.
    #[must_use]
    pub const fn new(unicode: bool) -> Self {
        if unicode {
            Self::UNICODE
        } else {
            Self::ASCII
        }
    }

    /// Prefix for nested rows.
    #[must_use]
    pub const fn branch(&self) -> &'static str {
        self.branch
    }

    /// Prefix for the highlighted row.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        self.marker
    }

    /// Separator before metadata.
    #[must_use]
    pub const fn separator(&self) -> &'static str {
        self.separator
    }
}

/// Indented tree, one comment per line, highlighted row marked.
#[must_use]
pub fn tree_to_text(tree: &RenderedTree, glyphs: Glyphs) -> String {
    if tree.is_empty() {
        return format!("{EMPTY_TREE_PLACEHOLDER}\n");
    }

    let mut out = String::new();
    for row in tree.rows() {
        let indent = "  ".repeat(row.depth);
        let branch = if row.depth > 0 { glyphs.branch } else { "" };
        let marker = if row.highlighted { glyphs.marker } else { "" };
        let _ = writeln!(
            out,
            "{indent}{branch}{marker}[{}] {}{}{}",
            row.id,
            single_line(&row.text),
            glyphs.separator,
            format_timestamp(&row.created_at),
        );
    }
    out
}

/// Ranked hit list.
#[must_use]
pub fn results_to_text(results: &RenderedResults, glyphs: Glyphs) -> String {
    match results {
        RenderedResults::Prompt => format!("{SEARCH_PROMPT}\n"),
        RenderedResults::NoResults { .. } => format!("{NO_RESULTS}\n"),
        RenderedResults::Hits { items, total, .. } => {
            let mut out = String::new();
            for item in items {
                let _ = writeln!(
                    out,
                    "[{}] {}{}rank {}{}{}",
                    item.id,
                    single_line(&item.snippet),
                    glyphs.separator,
                    item.rank,
                    glyphs.separator,
                    format_timestamp(&item.created_at),
                );
            }
            let _ = writeln!(out, "Found: {total}");
            out
        }
    }
}

//! Reusable TUI components.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::render::{
    format_timestamp, Affordance, Glyphs, HitRow, RenderedResults, RenderedTree, TreeRow, EMPTY_TREE_PLACEHOLDER,
    NO_RESULTS, SEARCH_PROMPT,
};
use crate::util::{single_line, truncate};

use super::theme::Theme;

/// A bordered list of lines that keeps one line centred when it can.
pub struct ScrollableText<'a> {
    title: String,
    content: Vec<Line<'a>>,
    center_on: Option<usize>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ScrollableText<'a> {
    /// Create a new scrollable text view.
    pub fn new(title: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
            center_on: None,
            focused: false,
            theme,
        }
    }

    /// Set content.
    pub fn content(mut self, content: Vec<Line<'a>>) -> Self {
        self.content = content;
        self
    }

    /// Line to keep in the middle of the viewport.
    pub fn center_on(mut self, line: Option<usize>) -> Self {
        self.center_on = line;
        self
    }

    /// Set focused state.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Render the component.
    pub fn render(self, f: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let scroll = scroll_offset(self.center_on, self.content.len(), visible);

        let visible_content: Vec<Line> = self.content.into_iter().skip(scroll).take(visible).collect();

        let paragraph = Paragraph::new(visible_content).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(self.theme.border_style(self.focused)),
        );

        f.render_widget(paragraph, area);
    }
}

/// First line to show so that `center` sits mid-viewport, clamped to content.
pub fn scroll_offset(center: Option<usize>, total: usize, visible: usize) -> usize {
    let Some(center) = center else {
        return 0;
    };
    if total <= visible {
        return 0;
    }
    center.saturating_sub(visible / 2).min(total - visible)
}

/// A status bar component.
pub struct StatusBar<'a> {
    left: Vec<Span<'a>>,
    right: Vec<Span<'a>>,
    style: Style,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(style: Style) -> Self {
        Self {
            left: Vec::new(),
            right: Vec::new(),
            style,
        }
    }

    /// Add left-aligned content.
    pub fn left(mut self, spans: Vec<Span<'a>>) -> Self {
        self.left = spans;
        self
    }

    /// Add right-aligned content.
    pub fn right(mut self, spans: Vec<Span<'a>>) -> Self {
        self.right = spans;
        self
    }

    /// Render the status bar.
    pub fn render(self, f: &mut Frame, area: Rect) {
        let left_width: usize = self.left.iter().map(|s| s.content.chars().count()).sum();
        let right_width: usize = self.right.iter().map(|s| s.content.chars().count()).sum();
        let padding = (area.width as usize).saturating_sub(left_width + right_width);

        let mut spans = self.left;
        spans.push(Span::raw(" ".repeat(padding.max(1))));
        spans.extend(self.right);

        f.render_widget(Paragraph::new(Line::from(spans)).style(self.style), area);
    }
}

/// Lines for the tree panel, and the line index of `selected_row`.
///
/// A row with an open reply box takes a second line for the box.
pub fn tree_lines(
    tree: &RenderedTree,
    selected_row: Option<usize>,
    theme: &Theme,
    glyphs: Glyphs,
    width: usize,
) -> (Vec<Line<'static>>, Option<usize>) {
    if tree.is_empty() {
        return (
            vec![Line::from(Span::styled(EMPTY_TREE_PLACEHOLDER, theme.placeholder_style()))],
            None,
        );
    }

    let mut lines = Vec::with_capacity(tree.rows().len());
    let mut selected_line = None;
    for (index, row) in tree.rows().iter().enumerate() {
        let selected = selected_row == Some(index);
        if selected {
            selected_line = Some(lines.len());
        }
        lines.push(tree_row_line(row, selected, theme, glyphs, width));
        if let Some(reply) = &row.reply {
            let indent = "  ".repeat(row.depth + 1);
            lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(format!("reply: {reply}_"), theme.reply_style()),
            ]));
        }
    }
    (lines, selected_line)
}

fn tree_row_line(row: &TreeRow, selected: bool, theme: &Theme, glyphs: Glyphs, width: usize) -> Line<'static> {
    let indent = "  ".repeat(row.depth);
    let branch = if row.depth > 0 { glyphs.branch() } else { "" };
    let id = format!("[{}] ", row.id);
    let meta = format!("{}{}", glyphs.separator(), format_timestamp(&row.created_at));
    // "send" only applies while the row's reply box is open.
    let hints = if selected {
        let open = row.reply.is_some();
        control_hints(Affordance::TREE_ROW.iter().filter(|a| open || **a != Affordance::Reply))
    } else {
        String::new()
    };
    let used = indent.chars().count() + branch.chars().count() + id.len() + meta.chars().count() + hints.len();
    let text = truncate(&single_line(&row.text), width.saturating_sub(used).max(8)).into_owned();

    let text_style = if row.highlighted {
        theme.highlight_style()
    } else {
        Style::default().fg(theme.foreground)
    };

    let line = Line::from(vec![
        Span::raw(format!("{indent}{branch}")),
        Span::styled(id, theme.id_style()),
        Span::styled(text, text_style),
        Span::styled(meta, theme.muted_style()),
        Span::styled(hints, theme.muted_style()),
    ]);
    if selected {
        line.style(theme.selection_style())
    } else {
        line
    }
}

/// Trailing `[a | b]` label list for the controls of the selected row.
fn control_hints<'a>(affordances: impl Iterator<Item = &'a Affordance>) -> String {
    let labels: Vec<&str> = affordances.map(|a| a.label()).collect();
    format!("  [{}]", labels.join(" | "))
}

/// Lines for the results panel, and the line index of `selected`.
pub fn result_lines(
    results: &RenderedResults,
    selected: Option<usize>,
    theme: &Theme,
    glyphs: Glyphs,
    width: usize,
) -> (Vec<Line<'static>>, Option<usize>) {
    match results {
        RenderedResults::Prompt => (
            vec![Line::from(Span::styled(SEARCH_PROMPT, theme.placeholder_style()))],
            None,
        ),
        RenderedResults::NoResults { .. } => (
            vec![Line::from(Span::styled(NO_RESULTS, theme.placeholder_style()))],
            None,
        ),
        RenderedResults::Hits { items, .. } => {
            let lines = items
                .iter()
                .enumerate()
                .map(|(index, hit)| hit_line(hit, selected == Some(index), theme, glyphs, width))
                .collect();
            (lines, selected)
        }
    }
}

fn hit_line(hit: &HitRow, selected: bool, theme: &Theme, glyphs: Glyphs, width: usize) -> Line<'static> {
    let id = format!("[{}] ", hit.id);
    let meta = format!("{}{}", glyphs.separator(), hit.rank);
    let hints = if selected {
        control_hints(Affordance::HIT_ROW.iter())
    } else {
        String::new()
    };
    let used = id.len() + meta.chars().count() + hints.len();
    let snippet = truncate(&single_line(&hit.snippet), width.saturating_sub(used).max(8)).into_owned();

    let line = Line::from(vec![
        Span::styled(id, theme.id_style()),
        Span::styled(snippet, Style::default().fg(theme.foreground)),
        Span::styled(meta, theme.muted_style()),
        Span::styled(hints, theme.muted_style()),
    ]);
    if selected {
        line.style(theme.selection_style())
    } else {
        line
    }
}

//! TUI application main loop.

use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::api::{execute as execute_request, CommentApi};
use crate::config::Config;
use crate::error::{CommentTreeError, Result};
use crate::navigation::{Completion, Effect};
use crate::view::ViewMode;

use super::components::{result_lines, tree_lines, ScrollableText, StatusBar};
use super::events::{Event, EventHandler};
use super::state::{AppState, InputMode, Panel};
use super::theme::available_themes;

/// Run the TUI against `api` until the user quits.
pub fn run<A: CommentApi + 'static>(config: &Config, api: A) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CommentTreeError::io("Failed to start async runtime", e))?;

    // Setup terminal
    enable_raw_mode().map_err(|e| {
        CommentTreeError::io(
            "Cannot launch TUI - no interactive terminal available. \
             Use the list/show/search subcommands for non-interactive use",
            e,
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| CommentTreeError::io("Failed to enter alternate screen", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CommentTreeError::io("Failed to create terminal", e))?;

    let mut app = AppState::new(config);
    let local = tokio::task::LocalSet::new();
    let result = local.block_on(&runtime, run_loop(&mut terminal, &mut app, Rc::new(api)));

    // Restore terminal
    disable_raw_mode().map_err(|e| CommentTreeError::io("Failed to disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| CommentTreeError::io("Failed to leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| CommentTreeError::io("Failed to show cursor", e))?;

    result
}

async fn run_loop<A: CommentApi + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    api: Rc<A>,
) -> Result<()> {
    let mut events = EventHandler::new(Duration::from_millis(250));
    let tx = events.sender();

    info!("tui started");
    let initial = app.start();
    spawn_effects(&api, &tx, initial);

    loop {
        terminal
            .draw(|f| draw_ui(f, app))
            .map_err(|e| CommentTreeError::io("Failed to draw TUI", e))?;

        let Some(event) = events.next().await else {
            break;
        };
        let effects = match event {
            Event::Key(key) => app.handle_key(key),
            Event::Completion(completion) => app.handle_completion(completion),
            Event::Tick | Event::Resize => Vec::new(),
        };
        spawn_effects(&api, &tx, effects);

        if app.should_quit {
            break;
        }
    }

    info!(in_flight = app.nav.in_flight(), "tui exiting");
    Ok(())
}

/// Run each effect as a local task; its completion comes back as an event.
fn spawn_effects<A: CommentApi + 'static>(api: &Rc<A>, tx: &UnboundedSender<Event>, effects: Vec<Effect>) {
    for effect in effects {
        let api = Rc::clone(api);
        let tx = tx.clone();
        tokio::task::spawn_local(async move {
            let Effect::Fetch { ticket, request } = effect;
            let result = execute_request(api.as_ref(), &request).await;
            // The loop may already be gone on quit.
            let _ = tx.send(Event::Completion(Completion::new(ticket, result)));
        });
    }
}

fn draw_ui(f: &mut Frame, app: &AppState) {
    let input_height = if app.input == InputMode::Normal { 0 } else { 3 };
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(main_chunks[0]);

    draw_tree_panel(f, app, chunks[0]);
    draw_results_panel(f, app, chunks[1]);

    if app.input != InputMode::Normal {
        draw_input_line(f, app, main_chunks[1]);
    }

    draw_status_bar(f, app, main_chunks[2]);

    if app.show_help {
        draw_help_overlay(f, app);
    }

    if app.confirm.is_some() {
        draw_confirm_dialog(f, app);
    }
}

fn draw_tree_panel(f: &mut Frame, app: &AppState, area: Rect) {
    let view = app.nav.view();
    let title = match view.mode() {
        ViewMode::Roots => format!(" Comments ({}) ", view.sort().label()),
        ViewMode::Subtree { root_id } => format!(" Thread #{root_id} ({}) ", view.sort().label()),
    };
    let width = area.width.saturating_sub(2) as usize;
    let (lines, selected_line) = tree_lines(app.tree(), Some(app.tree_selected), &app.theme, app.glyphs, width);

    ScrollableText::new(title, &app.theme)
        .content(lines)
        .center_on(selected_line)
        .focused(app.focus == Panel::Tree)
        .render(f, area);
}

fn draw_results_panel(f: &mut Frame, app: &AppState, area: Rect) {
    let title = match app.nav.search() {
        crate::navigation::SearchContent::Prompt => " Search ".to_string(),
        crate::navigation::SearchContent::Results { query, total, .. } => format!(" \"{query}\" ({total}) "),
    };
    let width = area.width.saturating_sub(2) as usize;
    let (lines, selected_line) =
        result_lines(app.results(), Some(app.results_selected), &app.theme, app.glyphs, width);

    ScrollableText::new(title, &app.theme)
        .content(lines)
        .center_on(selected_line)
        .focused(app.focus == Panel::Results)
        .render(f, area);
}

fn draw_input_line(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, text) = match app.input {
        InputMode::Search => (" Search ".to_string(), app.search_input.as_str()),
        InputMode::NewRoot => (" New comment ".to_string(), app.root_input.as_str()),
        InputMode::Reply(id) => (format!(" Reply to #{id} "), app.drafts.text(id)),
        InputMode::Normal => return,
    };

    let line = Line::from(vec![
        Span::styled("> ", app.theme.id_style()),
        Span::raw(text.to_string()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(format!("{title}(Enter to submit, Esc to cancel) "))
            .borders(Borders::ALL)
            .border_style(app.theme.border_style(true)),
    );
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let left = match app.nav.status() {
        Some(status) => vec![Span::styled(format!(" {status}"), app.theme.status_style(status.kind))],
        None => vec![Span::raw(" ")],
    };

    let mut right = Vec::new();
    if !app.nav.is_idle() {
        right.push(Span::raw(format!("{} pending  ", app.nav.in_flight())));
    }
    right.push(Span::styled("? help  q quit ", app.theme.muted_style()));

    StatusBar::new(Style::default()).left(left).right(right).render(f, area);
}

fn draw_help_overlay(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 70, f.area());

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/↓       Move down"),
        Line::from("  k/↑       Move up"),
        Line::from("  Tab       Switch between tree and results"),
        Line::from("  Enter     Open thread at selection / open hit in tree"),
        Line::from("  Esc       Back to all comments"),
        Line::from(""),
        Line::from("Comments:"),
        Line::from("  r         Toggle reply box (type, Enter to send)"),
        Line::from("  n         New top-level comment"),
        Line::from("  d         Delete comment and replies"),
        Line::from(""),
        Line::from("View:"),
        Line::from("  /         Search"),
        Line::from("  x         Reset search and view"),
        Line::from("  s         Toggle newest/oldest first"),
        Line::from("  Ctrl-R    Reload"),
        Line::from(""),
        Line::from(format!("Theme: {} (available: {})", app.theme.name, available_themes().join("/"))),
        Line::from(""),
        Line::from("  q         Quit"),
        Line::from("  ?         Toggle help"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(app.theme.border_style(true)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn draw_confirm_dialog(f: &mut Frame, app: &AppState) {
    let Some(confirm) = &app.confirm else {
        return;
    };
    let area = centered_rect(50, 20, f.area());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            confirm.prompt.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("y = yes, any other key = no", app.theme.muted_style())),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Confirm ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 70, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
        assert_eq!(inner.width, 60);
    }

    #[test]
    fn test_draw_initial_state() {
        let mut app = AppState::new(&Config::default());
        app.show_help = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, &app)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("No comments yet."));
        assert!(text.contains("Enter a query."));
        assert!(text.contains("Keyboard Shortcuts"));
    }
}

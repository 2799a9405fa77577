//! TUI application state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::model::CommentId;
use crate::navigation::{Action, Completion, Effect, Navigator, NavigatorOptions};
use crate::render::{
    render_results, render_tree, Affordance, Glyphs, HitRow, Invocation, RenderedResults, RenderedTree,
    ReplyDrafts, TreeRow,
};
use crate::view::{ViewMode, ViewState};

use super::events::KeyBindings;
use super::theme::Theme;

/// Focused panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Comment tree.
    Tree,
    /// Search results.
    Results,
}

/// What typed characters go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands.
    Normal,
    /// Editing the search query.
    Search,
    /// Writing a new top-level comment.
    NewRoot,
    /// Writing into the reply box under a node.
    Reply(CommentId),
}

/// A destructive action waiting for y/n.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConfirm {
    /// Question shown in the overlay.
    pub prompt: String,
    /// Action to dispatch on "yes".
    pub action: Action,
}

/// Application state.
pub struct AppState {
    /// Navigation controller.
    pub nav: Navigator,
    /// Reply boxes.
    pub drafts: ReplyDrafts,
    /// Focused panel.
    pub focus: Panel,
    /// Cursor row in the tree.
    pub tree_selected: usize,
    /// Cursor row in the results.
    pub results_selected: usize,
    /// Current input target.
    pub input: InputMode,
    /// Search query being edited.
    pub search_input: String,
    /// New top-level comment being edited.
    pub root_input: String,
    /// Open confirmation overlay.
    pub confirm: Option<PendingConfirm>,
    /// Show help overlay.
    pub show_help: bool,
    /// Current theme.
    pub theme: Theme,
    /// Tree glyphs.
    pub glyphs: Glyphs,
    /// Set when the user asked to quit.
    pub should_quit: bool,
    bindings: KeyBindings,
    tree: RenderedTree,
    results: RenderedResults,
}

impl AppState {
    /// Create app state from configuration.
    pub fn new(config: &Config) -> Self {
        let theme = Theme::from_name(&config.theme.name).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme.name, "unknown theme, using dark");
            Theme::dark()
        });
        let nav = Navigator::new(config.view.sort, NavigatorOptions::from(&config.view));
        Self {
            nav,
            drafts: ReplyDrafts::new(),
            focus: Panel::Tree,
            tree_selected: 0,
            results_selected: 0,
            input: InputMode::Normal,
            search_input: String::new(),
            root_input: String::new(),
            confirm: None,
            show_help: false,
            theme,
            glyphs: Glyphs::new(config.theme.unicode),
            should_quit: false,
            bindings: KeyBindings::default(),
            tree: RenderedTree::Empty,
            results: RenderedResults::Prompt,
        }
    }

    /// Effects for the initial root listing.
    pub fn start(&mut self) -> Vec<Effect> {
        self.dispatch(Action::LoadRoots)
    }

    /// Rendered tree panel.
    pub fn tree(&self) -> &RenderedTree {
        &self.tree
    }

    /// Rendered results panel.
    pub fn results(&self) -> &RenderedResults {
        &self.results
    }

    /// Row under the tree cursor.
    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.tree.rows().get(self.tree_selected)
    }

    /// Hit under the results cursor.
    pub fn selected_hit(&self) -> Option<&HitRow> {
        self.results.items().get(self.results_selected)
    }

    /// Feed a backend completion in.
    pub fn handle_completion(&mut self, completion: Completion) -> Vec<Effect> {
        let before = self.nav.view().clone();
        let effects = self.nav.complete(completion);
        self.refresh(&before);
        effects
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if self.bindings.is_quit(&key) && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Vec::new();
        }

        if let Some(confirm) = self.confirm.take() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => self.dispatch(confirm.action),
                _ => Vec::new(),
            };
        }

        if self.show_help {
            if self.bindings.is_help(&key) || self.bindings.is_back(&key) || self.bindings.is_quit(&key) {
                self.show_help = false;
            }
            return Vec::new();
        }

        match self.input {
            InputMode::Normal => self.handle_command(key),
            InputMode::Search => self.handle_search_input(key),
            InputMode::NewRoot => self.handle_root_input(key),
            InputMode::Reply(id) => self.handle_reply_input(id, key),
        }
    }

    fn handle_command(&mut self, key: KeyEvent) -> Vec<Effect> {
        let b = &self.bindings;
        if b.is_quit(&key) {
            self.should_quit = true;
        } else if b.is_help(&key) {
            self.show_help = true;
        } else if b.is_up(&key) {
            self.move_selection(-1);
        } else if b.is_down(&key) {
            self.move_selection(1);
        } else if b.is_switch_panel(&key) {
            self.focus = match self.focus {
                Panel::Tree => Panel::Results,
                Panel::Results => Panel::Tree,
            };
        } else if b.is_select(&key) {
            return self.open_selected();
        } else if b.is_reload(&key) {
            return self.dispatch(Action::Reload);
        } else if b.is_reply(&key) {
            if let Some(id) = self.tree_target() {
                return self.invoke(Affordance::ToggleReply, id);
            }
        } else if b.is_delete(&key) {
            if let Some(id) = self.tree_target() {
                return self.invoke(Affordance::Delete, id);
            }
        } else if b.is_new_root(&key) {
            self.input = InputMode::NewRoot;
        } else if b.is_search(&key) {
            self.input = InputMode::Search;
        } else if b.is_sort(&key) {
            let next = self.nav.view().sort().next_tree_order();
            return self.dispatch(Action::ChangeSort(next));
        } else if b.is_reset(&key) {
            self.search_input.clear();
            self.results_selected = 0;
            self.focus = Panel::Tree;
            return self.dispatch(Action::ResetSearch);
        } else if b.is_back(&key) {
            if matches!(self.nav.view().mode(), ViewMode::Subtree { .. }) {
                return self.dispatch(Action::LoadRoots);
            }
        }
        Vec::new()
    }

    fn handle_search_input(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => self.input = InputMode::Normal,
            KeyCode::Enter => {
                self.input = InputMode::Normal;
                self.focus = Panel::Results;
                self.results_selected = 0;
                let query = self.search_input.clone();
                return self.dispatch(Action::Search { query });
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.search_input.push(c),
            _ => {}
        }
        Vec::new()
    }

    fn handle_root_input(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => self.input = InputMode::Normal,
            KeyCode::Enter => {
                self.input = InputMode::Normal;
                let text = self.root_input.clone();
                let effects = self.dispatch(Action::CreateRoot { text });
                if !effects.is_empty() {
                    self.root_input.clear();
                }
                return effects;
            }
            KeyCode::Backspace => {
                self.root_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.root_input.push(c),
            _ => {}
        }
        Vec::new()
    }

    fn handle_reply_input(&mut self, id: CommentId, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => self.input = InputMode::Normal,
            KeyCode::Enter => {
                self.input = InputMode::Normal;
                let effects = self.invoke(Affordance::Reply, id);
                if !effects.is_empty() {
                    self.drafts.take(id);
                }
                self.rerender();
                return effects;
            }
            KeyCode::Backspace => self.drafts.pop(id),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.drafts.push(id, c),
            _ => {}
        }
        self.rerender();
        Vec::new()
    }

    fn open_selected(&mut self) -> Vec<Effect> {
        match self.focus {
            Panel::Tree => match self.selected_row() {
                Some(row) => {
                    let action = Action::OpenSubtree {
                        root_id: row.root_id,
                        highlight_id: Some(row.id),
                    };
                    self.dispatch(action)
                }
                None => Vec::new(),
            },
            Panel::Results => match self.selected_hit() {
                Some(hit) => {
                    let id = hit.id;
                    self.invoke(Affordance::OpenInTree, id)
                }
                None => Vec::new(),
            },
        }
    }

    fn tree_target(&self) -> Option<CommentId> {
        match self.focus {
            Panel::Tree => self.selected_row().map(|row| row.id),
            Panel::Results => None,
        }
    }

    fn invoke(&mut self, affordance: Affordance, id: CommentId) -> Vec<Effect> {
        match affordance.invoke(id, &self.drafts) {
            Invocation::ToggleReplyBox(id) => {
                self.input = if self.drafts.toggle(id) {
                    InputMode::Reply(id)
                } else {
                    InputMode::Normal
                };
                self.rerender();
                Vec::new()
            }
            Invocation::Dispatch(action) => self.dispatch(action),
            Invocation::Confirm { prompt, action } => {
                self.confirm = Some(PendingConfirm { prompt, action });
                Vec::new()
            }
        }
    }

    fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let before = self.nav.view().clone();
        let effects = self.nav.dispatch(action);
        self.refresh(&before);
        effects
    }

    fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.focus {
            Panel::Tree => (&mut self.tree_selected, self.tree.rows().len()),
            Panel::Results => (&mut self.results_selected, self.results.items().len()),
        };
        if len == 0 {
            *selected = 0;
            return;
        }
        *selected = selected.saturating_add_signed(delta).min(len - 1);
    }

    /// Re-render after the navigator changed. When the view or the tree
    /// content changes, the cursor jumps to the highlighted row.
    fn refresh(&mut self, before: &ViewState) {
        self.drafts.retain_present(self.nav.tree().nodes());
        let previous = std::mem::replace(
            &mut self.tree,
            render_tree(self.nav.tree().nodes(), self.nav.view(), &self.drafts),
        );
        self.results = render_results(self.nav.search());
        self.results_selected = self.results_selected.min(self.results.items().len().saturating_sub(1));

        let view_changed = self.nav.view() != before;
        if view_changed || previous != self.tree {
            match self.tree.highlight_row() {
                Some(row) => {
                    self.tree_selected = row;
                    self.focus = Panel::Tree;
                }
                None if view_changed => self.tree_selected = 0,
                None => {}
            }
        }
        self.tree_selected = self.tree_selected.min(self.tree.rows().len().saturating_sub(1));
    }

    fn rerender(&mut self) {
        self.tree = render_tree(self.nav.tree().nodes(), self.nav.view(), &self.drafts);
    }
}

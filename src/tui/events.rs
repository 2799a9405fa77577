//! TUI event handling.
//!
//! Terminal input, periodic ticks and backend completions all arrive on one
//! channel, so the main loop handles them strictly one at a time.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::navigation::Completion;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Periodic redraw.
    Tick,
    /// Key press event.
    Key(KeyEvent),
    /// Terminal resize.
    Resize,
    /// A backend request finished.
    Completion(Completion),
}

impl Event {
    /// Map raw terminal input to an application event. Only key presses and
    /// resizes get through.
    fn from_terminal(input: CrosstermEvent) -> Option<Self> {
        match input {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Resize(..) => Some(Self::Resize),
            _ => None,
        }
    }
}

/// Event handler using channels.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Start reading terminal input. Must be called inside a `LocalSet`.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        tokio::task::spawn_local(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);
            loop {
                let event = tokio::select! {
                    _ = tick.tick() => Event::Tick,
                    maybe = reader.next() => match maybe {
                        Some(Ok(input)) => match Event::from_terminal(input) {
                            Some(event) => event,
                            None => continue,
                        },
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "terminal input error");
                            break;
                        }
                        None => break,
                    },
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender for posting completions back to the loop.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Get the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key binding configuration.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Quit keys.
    pub quit: Vec<KeyEvent>,
    /// Navigation up.
    pub up: Vec<KeyEvent>,
    /// Navigation down.
    pub down: Vec<KeyEvent>,
    /// Switch between tree and results.
    pub switch_panel: Vec<KeyEvent>,
    /// Open the selected node or hit.
    pub select: Vec<KeyEvent>,
    /// Back to the root listing.
    pub back: Vec<KeyEvent>,
    /// Toggle the reply box.
    pub reply: Vec<KeyEvent>,
    /// Delete the selected comment.
    pub delete: Vec<KeyEvent>,
    /// Write a new top-level comment.
    pub new_root: Vec<KeyEvent>,
    /// Start a search.
    pub search: Vec<KeyEvent>,
    /// Cycle tree order.
    pub sort: Vec<KeyEvent>,
    /// Refetch the current view.
    pub reload: Vec<KeyEvent>,
    /// Clear search and return to roots.
    pub reset: Vec<KeyEvent>,
    /// Toggle help.
    pub help: Vec<KeyEvent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let key = |c: char| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        Self {
            quit: vec![key('q'), KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)],
            up: vec![KeyEvent::new(KeyCode::Up, KeyModifiers::NONE), key('k')],
            down: vec![KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), key('j')],
            switch_panel: vec![KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)],
            select: vec![KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)],
            back: vec![KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)],
            reply: vec![key('r')],
            delete: vec![key('d')],
            new_root: vec![key('n')],
            search: vec![key('/')],
            sort: vec![key('s')],
            reload: vec![KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)],
            reset: vec![key('x')],
            help: vec![key('?')],
        }
    }
}

fn matches(bindings: &[KeyEvent], key: &KeyEvent) -> bool {
    // Shifted characters ('?') arrive with SHIFT on some terminals.
    let modifiers = match key.code {
        KeyCode::Char(_) => key.modifiers - KeyModifiers::SHIFT,
        _ => key.modifiers,
    };
    bindings.iter().any(|k| k.code == key.code && k.modifiers == modifiers)
}

impl KeyBindings {
    /// Check if a key matches quit binding.
    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        matches(&self.quit, key)
    }

    /// Check if a key matches up binding.
    pub fn is_up(&self, key: &KeyEvent) -> bool {
        matches(&self.up, key)
    }

    /// Check if a key matches down binding.
    pub fn is_down(&self, key: &KeyEvent) -> bool {
        matches(&self.down, key)
    }

    /// Check if a key matches the panel switch binding.
    pub fn is_switch_panel(&self, key: &KeyEvent) -> bool {
        matches(&self.switch_panel, key)
    }

    /// Check if a key matches select binding.
    pub fn is_select(&self, key: &KeyEvent) -> bool {
        matches(&self.select, key)
    }

    /// Check if a key matches back binding.
    pub fn is_back(&self, key: &KeyEvent) -> bool {
        matches(&self.back, key)
    }

    /// Check if a key matches reply binding.
    pub fn is_reply(&self, key: &KeyEvent) -> bool {
        matches(&self.reply, key)
    }

    /// Check if a key matches delete binding.
    pub fn is_delete(&self, key: &KeyEvent) -> bool {
        matches(&self.delete, key)
    }

    /// Check if a key matches new-comment binding.
    pub fn is_new_root(&self, key: &KeyEvent) -> bool {
        matches(&self.new_root, key)
    }

    /// Check if a key matches search binding.
    pub fn is_search(&self, key: &KeyEvent) -> bool {
        matches(&self.search, key)
    }

    /// Check if a key matches sort binding.
    pub fn is_sort(&self, key: &KeyEvent) -> bool {
        matches(&self.sort, key)
    }

    /// Check if a key matches reload binding.
    pub fn is_reload(&self, key: &KeyEvent) -> bool {
        matches(&self.reload, key)
    }

    /// Check if a key matches reset binding.
    pub fn is_reset(&self, key: &KeyEvent) -> bool {
        matches(&self.reset, key)
    }

    /// Check if a key matches help binding.
    pub fn is_help(&self, key: &KeyEvent) -> bool {
        matches(&self.help, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_requires_control() {
        let bindings = KeyBindings::default();
        let plain_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert!(bindings.is_reply(&plain_r));
        assert!(!bindings.is_reload(&plain_r));
        assert!(bindings.is_reload(&ctrl_r));
        assert!(!bindings.is_reply(&ctrl_r));
    }

    #[test]
    fn test_terminal_input_mapping() {
        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let mut release = press;
        release.kind = KeyEventKind::Release;

        assert!(matches!(Event::from_terminal(CrosstermEvent::Resize(80, 24)), Some(Event::Resize)));
        assert!(matches!(Event::from_terminal(CrosstermEvent::Key(press)), Some(Event::Key(k)) if k == press));
        assert!(Event::from_terminal(CrosstermEvent::Key(release)).is_none());
        assert!(Event::from_terminal(CrosstermEvent::FocusGained).is_none());
    }

    #[test]
    fn test_shifted_help_key() {
        let bindings = KeyBindings::default();
        assert!(bindings.is_help(&KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        assert!(bindings.is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }
}

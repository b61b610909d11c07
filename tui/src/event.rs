use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

use crate::app::{App, View};
use crate::config::key_matches;

/// Terminal events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick event
    Tick,
    /// Terminal window regained focus
    FocusGained,
}

/// Event handler for the terminal
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CEvent::Key(key) => return Ok(Event::Key(key)),
                CEvent::FocusGained => return Ok(Event::FocusGained),
                _ => {}
            }
        }
        Ok(Event::Tick)
    }
}

/// Handle key events for the application
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    // On Windows, crossterm reports both key press and release events.
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Confirmation dialog takes precedence
    if app.pending_confirm.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_pending(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_pending(),
            _ => {}
        }
        return;
    }

    if app.help_open {
        if key.code == KeyCode::Esc || key_matches(&app.config.keymap.help, &key) {
            app.close_help();
        }
        return;
    }

    let keymap = app.config.keymap.clone();

    // --- Global key handlers ---
    if key_matches(&keymap.quit, &key) {
        app.quit();
    } else if key_matches(&keymap.help, &key) {
        app.open_help();
    } else if key_matches(&keymap.show_home, &key) {
        app.show_home();
    } else if key_matches(&keymap.show_favorites, &key) {
        app.show_favorites();
    } else if key.code == KeyCode::Tab {
        match app.view {
            View::Home => app.show_favorites(),
            View::Favorites => app.show_home(),
        }
    } else {
        match app.view {
            View::Home => handle_home_input(key, app, &keymap),
            View::Favorites => handle_favorites_input(key, app, &keymap),
        }
    }
}

fn handle_home_input(key: KeyEvent, app: &mut App, keymap: &crate::config::Keymap) {
    if key_matches(&keymap.new_quote, &key) {
        app.next_quote();
    } else if key_matches(&keymap.toggle_favorite, &key) {
        app.toggle_favorite_current();
    } else if key_matches(&keymap.share, &key) {
        app.share_current();
    }
}

fn handle_favorites_input(key: KeyEvent, app: &mut App, keymap: &crate::config::Keymap) {
    if key_matches(&keymap.select_up, &key) {
        app.favorites_select_up();
    } else if key_matches(&keymap.select_down, &key) {
        app.favorites_select_down();
    } else if key_matches(&keymap.share, &key) {
        app.share_selected_favorite();
    } else if key_matches(&keymap.clear_favorites, &key) {
        app.request_clear_favorites();
    } else if key_matches(&keymap.remove_favorite, &key) || key.code == KeyCode::Delete {
        app.request_remove_selected();
    } else if key.code == KeyCode::Esc {
        app.show_home();
    }
}

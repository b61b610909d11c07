use crate::app::{App, View};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::{
    render_confirmation, render_favorites_list, render_header, render_help_screen,
    render_nav_bar, render_quote_card, render_status_bar,
};

/// Render the complete UI
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.size();

    // Header, content, navigation bar, status line
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(frame, app, chunks[0]);
    match app.view {
        View::Home => render_quote_card(frame, app, chunks[1]),
        View::Favorites => render_favorites_list(frame, app, chunks[1]),
    }
    render_nav_bar(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Overlays (drawn last)
    if app.help_open {
        render_help_screen(frame, app, size);
    }
    if app.pending_confirm.is_some() {
        render_confirmation(frame, app, size);
    }
}

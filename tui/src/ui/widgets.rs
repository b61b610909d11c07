use crate::app::{App, NotificationKind, PendingConfirm, View};
use dailyquote_core::share::author_name;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

/// Render the header with title and key hints
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let keys = &app.config.keymap;
    let key_hints = match app.view {
        View::Home => format!(
            " [{}:New quote] [{}:Favorite] [{}:Share] [Tab:Favorites] [{}:Help] [{}:Quit] ",
            keys.new_quote, keys.toggle_favorite, keys.share, keys.help, keys.quit
        ),
        View::Favorites => format!(
            " [{}/{}:Select] [{}:Share] [{}:Remove] [{}:Clear all] [Tab:Home] [{}:Quit] ",
            keys.select_up, keys.select_down, keys.share, keys.remove_favorite, keys.clear_favorites, keys.quit
        ),
    };

    let header_spans = vec![
        Span::styled(
            " ❝ Daily Quote ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(key_hints, Style::default().fg(Color::DarkGray)),
    ];

    let header = Paragraph::new(Line::from(header_spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

/// Render the current quote as a centered card
pub fn render_quote_card(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Quote of the moment ");

    let Some(quote) = app.selection.current() else {
        let empty = Paragraph::new(format!(
            "No quote yet. Press '{}' to get one.",
            app.config.keymap.new_quote
        ))
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let heart = if app.selection.current_is_favorite() {
        Span::styled("♥ In your favorites", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("♡ Not in favorites", Style::default().fg(Color::DarkGray))
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("“{}”", quote.text),
            Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("— {}", author_name(&quote.author)),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(heart),
    ];

    // Vertically center the text inside the card
    let inner_height = area.height.saturating_sub(2);
    let text_height = (lines.len() as u16 + 2).min(inner_height);
    let padding = inner_height.saturating_sub(text_height) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(padding), Constraint::Min(0)])
        .split(area);

    frame.render_widget(block, area);
    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let text_area = Rect {
        x: area.x + 2,
        y: chunks[1].y.max(area.y + 1),
        width: area.width.saturating_sub(4),
        height: chunks[1].height.saturating_sub(1),
    };
    frame.render_widget(card, text_area);
}

/// Render the favorites list, newest first
pub fn render_favorites_list(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Favorites ({}) ", app.favorites.len());

    if app.favorites.is_empty() {
        let empty_message = Paragraph::new(format!(
            "No favorites yet. Press '{}' on a quote to save it.",
            app.config.keymap.toggle_favorite
        ))
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_message, area);
        return;
    }

    let items: Vec<ListItem> = app
        .favorites
        .iter()
        .map(|record| {
            let saved = record.favorited_at_datetime().format("%Y-%m-%d");
            ListItem::new(vec![
                Line::from(format!("“{}”", record.quote.text)),
                Line::from(Span::styled(
                    format!("   — {} · saved {}", author_name(&record.quote.author), saved),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.favorites_selected_index));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Left),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the bottom navigation with the live favorites badge
pub fn render_nav_bar(frame: &mut Frame, app: &App, area: Rect) {
    let titles = vec![
        Line::from(" ⌂ Home "),
        Line::from(format!(" ♥ Favorites ({}) ", app.badge.count())),
    ];
    let selected = match app.view {
        View::Home => 0,
        View::Favorites => 1,
    };

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar: the active notification, or a summary
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_bar = match &app.notification {
        Some(n) => {
            let bg = match n.kind {
                NotificationKind::Success => Color::Green,
                NotificationKind::Error => Color::Red,
            };
            Paragraph::new(format!(" {} ", n.message))
                .style(Style::default().bg(bg).fg(Color::Black))
        }
        None => {
            let source = if app.selection.is_remote() { "remote" } else { "local" };
            Paragraph::new(format!(
                " Favorites: {} | Source: {} | [{}:Help] ",
                app.badge.count(),
                source,
                app.config.keymap.help
            ))
            .style(Style::default().bg(Color::DarkGray).fg(Color::White))
        }
    };

    frame.render_widget(status_bar.alignment(Alignment::Center), area);
}

/// Render the y/n confirmation dialog
pub fn render_confirmation(frame: &mut Frame, app: &App, area: Rect) {
    let question = match &app.pending_confirm {
        Some(PendingConfirm::RemoveFavorite(_)) => "Remove this quote from favorites?",
        Some(PendingConfirm::ClearFavorites) => "Remove ALL favorites?",
        None => return,
    };

    let popup_width = 50.min(area.width);
    let popup_height = 5.min(area.height);
    let popup_area = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    let text = vec![
        Line::from(question),
        Line::from(""),
        Line::from(Span::styled("[y] Yes   [n] No", Style::default().fg(Color::Yellow))),
    ];
    let dialog = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Confirm "))
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(dialog, popup_area);
}

/// Render the help screen overlay
pub fn render_help_screen(frame: &mut Frame, app: &App, size: Rect) {
    let keys = &app.config.keymap;
    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
    };
    let binding = |key: &str, what: &str| Line::from(format!("{:<12} {}", key, what));

    let help_text = vec![
        Line::from(""),
        section("Home"),
        binding(&keys.new_quote, "New quote"),
        binding(&keys.toggle_favorite, "Add / remove favorite"),
        binding(&keys.share, "Share quote"),
        Line::from(""),
        section("Favorites"),
        binding(&format!("{}/{}", keys.select_up, keys.select_down), "Select"),
        binding(&keys.share, "Share selected"),
        binding(&keys.remove_favorite, "Remove selected"),
        binding(&keys.clear_favorites, "Clear all favorites"),
        Line::from(""),
        section("Interface"),
        binding(&keys.show_home, "Home"),
        binding(&keys.show_favorites, "Favorites"),
        binding("tab", "Switch screen"),
        binding(&keys.help, "Show this help"),
        binding(&keys.quit, "Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            format!("Press '{}' or 'Esc' to close", keys.help),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup_width = 60.min(size.width);
    let popup_height = (help_text.len() as u16 + 2).min(size.height);
    let x = (size.width.saturating_sub(popup_width)) / 2;
    let y = (size.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    let block = Block::default()
        .title(" Help - Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 1,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(2),
        height: popup_area.height.saturating_sub(2),
    };

    let paragraph = Paragraph::new(help_text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, inner);
}

use anyhow::Result;
use dailyquote_core::{
    badge::FavoritesBadge,
    corpus::{default_corpus, validate_corpus},
    models::FavoriteRecord,
    remote::ZenQuotesClient,
    selection::QuoteSelection,
    share::{ShareAdapter, ShareOutcome, ShareTarget},
    storage::{FavoritesStore, SqliteStore},
    Error,
};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::{Config, QuoteSource};
use crate::share::{CommandShare, NoNativeShare, SystemClipboard};

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Favorites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
}

/// Action waiting for a y/n answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    RemoveFavorite(String),
    ClearFavorites,
}

/// Application state
pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub config: Config,
    pub store: FavoritesStore,
    pub selection: QuoteSelection,
    pub badge: FavoritesBadge,
    pub share: ShareAdapter,
    // Favorites screen, newest first
    pub favorites: Vec<FavoriteRecord>,
    pub favorites_selected_index: usize,
    pub notification: Option<Notification>,
    pub pending_confirm: Option<PendingConfirm>,
    pub help_open: bool,
}

impl App {
    /// Create the app with durable storage under `data_dir`
    pub fn new(config: Config, data_dir: &Path) -> Result<Self> {
        let store = FavoritesStore::new(SqliteStore::open(data_dir.join("favorites.db"))?);

        let selection = match config.quotes.source {
            QuoteSource::Remote => QuoteSelection::remote(Box::new(ZenQuotesClient::new(
                config.quotes.base_url.clone(),
                config.remote_timeout(),
            ))),
            QuoteSource::Local => {
                let corpus = default_corpus();
                validate_corpus(&corpus)?;
                QuoteSelection::local(corpus)
            }
        };

        let target: Box<dyn ShareTarget> = match config
            .share
            .command
            .as_deref()
            .and_then(CommandShare::new)
        {
            Some(command) => Box::new(command),
            None => Box::new(NoNativeShare),
        };
        let share = ShareAdapter::new(target, Box::new(SystemClipboard::default()));

        info!(source = ?config.quotes.source, "app initialised");
        Ok(Self::with_parts(config, store, selection, share))
    }

    /// Assemble the app from already-built collaborators
    pub fn with_parts(
        config: Config,
        store: FavoritesStore,
        selection: QuoteSelection,
        share: ShareAdapter,
    ) -> Self {
        let badge = FavoritesBadge::attach(&store, config.badge_mode());
        Self {
            should_quit: false,
            view: View::Home,
            config,
            store,
            selection,
            badge,
            share,
            favorites: Vec::new(),
            favorites_selected_index: 0,
            notification: None,
            pending_confirm: None,
            help_open: false,
        }
    }

    // =========================
    // Home screen
    // =========================

    /// Show a new quote; failures keep the current one and are reported
    pub fn next_quote(&mut self) {
        if let Err(err) = self.selection.next(&self.store) {
            warn!(%err, "failed to load quote");
            self.notify_error(match err {
                Error::Network(_) => {
                    "Failed to fetch quote. Check your internet connection and try again.".to_string()
                }
                other => other.to_string(),
            });
        }
    }

    pub fn toggle_favorite_current(&mut self) {
        let quote = match self.selection.current() {
            Some(q) => q.clone(),
            None => return,
        };

        match self.store.toggle(&quote) {
            Ok(true) => self.notify_success("Added to favorites"),
            Ok(false) => self.notify_success("Removed from favorites"),
            Err(err) => self.notify_error(err.to_string()),
        }
        self.selection.refresh_favorite(&self.store);
    }

    pub fn share_current(&mut self) {
        if let Some(quote) = self.selection.current().cloned() {
            let result = self.share.share_quote(&quote);
            self.report_share(result);
        }
    }

    // =========================
    // Favorites screen
    // =========================

    pub fn refresh_favorites_list(&mut self) {
        self.favorites = self.store.list_recent();
        if self.favorites_selected_index >= self.favorites.len() {
            self.favorites_selected_index = self.favorites.len().saturating_sub(1);
        }
    }

    pub fn selected_favorite(&self) -> Option<&FavoriteRecord> {
        self.favorites.get(self.favorites_selected_index)
    }

    pub fn favorites_select_up(&mut self) {
        self.favorites_selected_index = self.favorites_selected_index.saturating_sub(1);
    }

    pub fn favorites_select_down(&mut self) {
        if self.favorites_selected_index + 1 < self.favorites.len() {
            self.favorites_selected_index += 1;
        }
    }

    pub fn share_selected_favorite(&mut self) {
        if let Some(record) = self.selected_favorite().cloned() {
            let result = self.share.share_quote(&record.quote);
            self.report_share(result);
        }
    }

    /// Ask before removing the selected favorite
    pub fn request_remove_selected(&mut self) {
        if let Some(record) = self.selected_favorite() {
            self.pending_confirm = Some(PendingConfirm::RemoveFavorite(record.id().to_string()));
        }
    }

    /// Ask before clearing every favorite
    pub fn request_clear_favorites(&mut self) {
        if !self.favorites.is_empty() {
            self.pending_confirm = Some(PendingConfirm::ClearFavorites);
        }
    }

    pub fn confirm_pending(&mut self) {
        let result = match self.pending_confirm.take() {
            Some(PendingConfirm::RemoveFavorite(id)) => self
                .store
                .remove(&id)
                .map(|_| "Quote removed from favorites"),
            Some(PendingConfirm::ClearFavorites) => {
                self.store.clear().map(|_| "All favorites cleared")
            }
            None => return,
        };

        match result {
            Ok(message) => self.notify_success(message),
            Err(err) => self.notify_error(err.to_string()),
        }
        self.refresh_favorites_list();
        self.selection.refresh_favorite(&self.store);
    }

    pub fn cancel_pending(&mut self) {
        self.pending_confirm = None;
    }

    // =========================
    // Navigation
    // =========================

    pub fn show_home(&mut self) {
        self.view = View::Home;
        self.selection.refresh_favorite(&self.store);
    }

    pub fn show_favorites(&mut self) {
        self.view = View::Favorites;
        self.refresh_favorites_list();
    }

    /// Terminal regained focus: re-read everything derived from storage
    pub fn focus_gained(&mut self) {
        self.badge.on_focus(&self.store);
        self.selection.refresh_favorite(&self.store);
        if self.view == View::Favorites {
            self.refresh_favorites_list();
        }
    }

    /// Handle tick events
    pub fn tick(&mut self) {
        self.badge.sync(&self.store);
        if let Some(n) = &self.notification {
            if n.created_at.elapsed() >= NOTIFICATION_TTL {
                self.notification = None;
            }
        }
    }

    pub fn open_help(&mut self) {
        self.help_open = true;
    }

    pub fn close_help(&mut self) {
        self.help_open = false;
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // =========================
    // Notifications
    // =========================

    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.notify(message.into(), NotificationKind::Success);
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notify(message.into(), NotificationKind::Error);
    }

    fn notify(&mut self, message: String, kind: NotificationKind) {
        self.notification = Some(Notification {
            message,
            kind,
            created_at: Instant::now(),
        });
    }

    fn report_share(&mut self, result: dailyquote_core::Result<ShareOutcome>) {
        match result {
            Ok(ShareOutcome::Shared) => self.notify_success("Quote shared"),
            Ok(ShareOutcome::Copied) => self.notify_success("Quote copied to clipboard!"),
            Ok(ShareOutcome::Cancelled) => {}
            Err(err) => {
                warn!(%err, "share failed");
                self.notify_error("Failed to copy quote");
            }
        }
    }
}

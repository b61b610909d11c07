//! Keeps a navigation badge equal to the favorites count.

use std::time::{Duration, Instant};

use crate::storage::{FavoritesStore, Subscription};

/// Push mode still re-reads at this interval to pick up writes made by
/// other processes, which emit no events here
pub const PUSH_RESYNC_INTERVAL: Duration = Duration::from_secs(5);

/// How the badge learns about changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeMode {
    /// Subscribe to store notifications
    Push,
    /// Re-read the count every interval
    Poll(Duration),
}

enum Source {
    Push(Subscription),
    Poll { interval: Duration },
}

/// Favorites counter for navigation chrome.
///
/// Created when the chrome mounts; dropping it tears down the subscription.
/// Poll mode exists for hosts that cannot hold a subscription.
pub struct FavoritesBadge {
    count: usize,
    source: Source,
    last_read: Instant,
}

impl FavoritesBadge {
    /// Mount the badge: reads the current count immediately
    pub fn attach(store: &FavoritesStore, mode: BadgeMode) -> Self {
        let source = match mode {
            BadgeMode::Push => Source::Push(store.subscribe()),
            BadgeMode::Poll(interval) => Source::Poll { interval },
        };
        Self {
            count: store.count(),
            source,
            last_read: Instant::now(),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mode(&self) -> BadgeMode {
        match &self.source {
            Source::Push(_) => BadgeMode::Push,
            Source::Poll { interval } => BadgeMode::Poll(*interval),
        }
    }

    /// Bring the count up to date; call on every UI tick
    pub fn sync(&mut self, store: &FavoritesStore) -> usize {
        self.sync_at(store, Instant::now())
    }

    pub fn sync_at(&mut self, store: &FavoritesStore, now: Instant) -> usize {
        let interval = match &self.source {
            Source::Push(subscription) => {
                if let Some(last) = subscription.drain().last() {
                    self.count = last.count();
                }
                PUSH_RESYNC_INTERVAL
            }
            Source::Poll { interval } => *interval,
        };
        if now.saturating_duration_since(self.last_read) >= interval {
            self.count = store.count();
            self.last_read = now;
        }
        self.count
    }

    /// Regain-of-focus: re-read immediately regardless of mode
    pub fn on_focus(&mut self, store: &FavoritesStore) -> usize {
        if let Source::Push(subscription) = &self.source {
            // Stale events are superseded by the fresh read
            subscription.drain();
        }
        self.last_read = Instant::now();
        self.count = store.count();
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::default_corpus;
    use crate::models::Quote;
    use crate::storage::MemoryStore;

    fn setup_store() -> (MemoryStore, FavoritesStore) {
        let memory = MemoryStore::new();
        let store = FavoritesStore::new(memory.clone());
        (memory, store)
    }

    fn quote_3() -> Quote {
        default_corpus().into_iter().find(|q| q.id == "3").unwrap()
    }

    #[test]
    fn test_attach_reads_current_count() {
        let (_memory, store) = setup_store();
        store.add(&Quote::new("1", "a", "b")).unwrap();

        let badge = FavoritesBadge::attach(&store, BadgeMode::Push);
        assert_eq!(badge.count(), 1);
    }

    #[test]
    fn test_push_badge_converges() {
        let (_memory, store) = setup_store();
        let mut badge = FavoritesBadge::attach(&store, BadgeMode::Push);
        assert_eq!(badge.count(), 0);

        store.add(&quote_3()).unwrap();
        assert_eq!(badge.sync(&store), 1);

        store.remove("3").unwrap();
        assert_eq!(badge.sync(&store), 0);
    }

    #[test]
    fn test_push_badge_sees_clear() {
        let (_memory, store) = setup_store();
        let mut badge = FavoritesBadge::attach(&store, BadgeMode::Push);
        store.add(&Quote::new("1", "a", "b")).unwrap();
        store.add(&Quote::new("2", "a", "b")).unwrap();
        store.clear().unwrap();
        assert_eq!(badge.sync(&store), 0);
    }

    #[test]
    fn test_poll_badge_converges_after_interval() {
        let (_memory, store) = setup_store();
        let interval = Duration::from_millis(500);
        let mut badge = FavoritesBadge::attach(&store, BadgeMode::Poll(interval));
        let start = Instant::now();

        store.add(&quote_3()).unwrap();
        // Not yet due
        assert_eq!(badge.sync_at(&store, start), 0);
        assert_eq!(badge.sync_at(&store, start + interval), 1);

        store.remove("3").unwrap();
        assert_eq!(badge.sync_at(&store, start + interval * 2), 0);
    }

    #[test]
    fn test_push_badge_resyncs_external_writes() {
        let (memory, store) = setup_store();
        let mut badge = FavoritesBadge::attach(&store, BadgeMode::Push);
        let start = Instant::now();

        // Another process writing the same storage: no events reach us
        let other = FavoritesStore::new(memory.clone());
        other.add(&quote_3()).unwrap();

        assert_eq!(badge.sync_at(&store, start), 0);
        assert_eq!(badge.sync_at(&store, start + PUSH_RESYNC_INTERVAL), 1);
    }

    #[test]
    fn test_focus_refreshes_immediately() {
        let (_memory, store) = setup_store();
        let mut badge = FavoritesBadge::attach(&store, BadgeMode::Poll(Duration::from_secs(3600)));

        store.add(&quote_3()).unwrap();
        assert_eq!(badge.sync(&store), 0);
        assert_eq!(badge.on_focus(&store), 1);
    }

    #[test]
    fn test_dropping_badge_unsubscribes() {
        let (_memory, store) = setup_store();
        let badge = FavoritesBadge::attach(&store, BadgeMode::Push);
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(badge.mode(), BadgeMode::Push);

        drop(badge);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_badges_on_two_screens_agree() {
        let (_memory, store) = setup_store();
        let mut home = FavoritesBadge::attach(&store, BadgeMode::Push);
        let mut favorites = FavoritesBadge::attach(&store, BadgeMode::Poll(Duration::ZERO));

        for quote in default_corpus().iter().take(4) {
            store.add(quote).unwrap();
        }
        store.remove("2").unwrap();

        assert_eq!(home.sync(&store), 3);
        assert_eq!(favorites.sync(&store), 3);
    }
}

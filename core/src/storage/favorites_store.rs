use crate::models::{FavoriteRecord, Quote};
use crate::{Error, Result};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, warn};

use super::KeyValueStore;

/// Storage key holding the serialized favorites list
pub const FAVORITES_KEY: &str = "@DailyQuoteApp_favorites";

/// Change notification emitted after a successful durable write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesEvent {
    Added { id: String, count: usize },
    Removed { id: String, count: usize },
    Cleared,
}

impl FavoritesEvent {
    /// Favorites count after the change
    pub fn count(&self) -> usize {
        match self {
            FavoritesEvent::Added { count, .. } | FavoritesEvent::Removed { count, .. } => *count,
            FavoritesEvent::Cleared => 0,
        }
    }
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    senders: Vec<(u64, Sender<FavoritesEvent>)>,
}

/// Live subscription to favorites changes. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    receiver: Receiver<FavoritesEvent>,
    registry: Weak<RefCell<Subscribers>>,
}

impl Subscription {
    /// Next pending event, if any
    pub fn try_next(&self) -> Option<FavoritesEvent> {
        self.receiver.try_recv().ok()
    }

    /// All pending events, oldest first
    pub fn drain(&self) -> Vec<FavoritesEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().senders.retain(|(id, _)| *id != self.id);
        }
    }
}

/// The single source of truth for which quotes are favorited.
///
/// The whole list lives as one JSON blob under [`FAVORITES_KEY`]. Every
/// mutation reads the full list, modifies it and rewrites the full blob
/// before returning.
///
/// Read failures (storage unavailable, unparseable or old-shape data) are
/// recovered to an empty list. Write failures are returned to the caller.
///
/// Mutations read through the same recovery. An `add` or `remove` issued
/// while storage is unreadable, even transiently (a locked database while
/// another process writes), starts from an empty list and rewrites the blob
/// with only its own change. Every previously stored favorite is lost.
///
/// Known limitation: the read-modify-write cycle holds no lock. Two writers
/// interleaving on the same storage can lose one of the updates. Callers are
/// expected to finish one mutation before issuing the next.
///
/// Removing an id that is not favorited is a silent no-op: no error, the
/// blob is still rewritten and a `Removed` event still fires.
pub struct FavoritesStore {
    storage: Box<dyn KeyValueStore>,
    subscribers: Rc<RefCell<Subscribers>>,
}

impl FavoritesStore {
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            subscribers: Rc::new(RefCell::new(Subscribers::default())),
        }
    }

    /// All favorites in storage order (oldest first)
    pub fn list(&self) -> Vec<FavoriteRecord> {
        match self.read() {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "failed to read favorites, treating as empty");
                Vec::new()
            }
        }
    }

    /// All favorites, most recently favorited first
    pub fn list_recent(&self) -> Vec<FavoriteRecord> {
        let mut records = self.list();
        records.sort_by(|a, b| b.favorited_at.cmp(&a.favorited_at));
        records
    }

    pub fn get(&self, id: &str) -> Option<FavoriteRecord> {
        self.list().into_iter().find(|r| r.id() == id)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.list().iter().any(|r| r.id() == id)
    }

    pub fn count(&self) -> usize {
        self.list().len()
    }

    /// Favorite a quote, stamping it with the current time
    pub fn add(&self, quote: &Quote) -> Result<FavoriteRecord> {
        let mut records = self.list();
        if records.iter().any(|r| r.id() == quote.id) {
            return Err(Error::AlreadyFavorited(quote.id.clone()));
        }

        let record = FavoriteRecord::new(quote.clone());
        records.push(record.clone());
        self.write(&records)?;

        debug!(id = %quote.id, count = records.len(), "added favorite");
        self.notify(FavoritesEvent::Added {
            id: quote.id.clone(),
            count: records.len(),
        });
        Ok(record)
    }

    /// Unfavorite a quote by id. Absent ids are a no-op.
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut records = self.list();
        records.retain(|r| r.id() != id);
        self.write(&records)?;

        debug!(%id, count = records.len(), "removed favorite");
        self.notify(FavoritesEvent::Removed {
            id: id.to_string(),
            count: records.len(),
        });
        Ok(())
    }

    /// Remove if favorited, add otherwise. Returns the new favorited state.
    pub fn toggle(&self, quote: &Quote) -> Result<bool> {
        if self.is_favorite(&quote.id) {
            self.remove(&quote.id)?;
            Ok(false)
        } else {
            self.add(quote)?;
            Ok(true)
        }
    }

    /// Delete the stored blob entirely
    pub fn clear(&self) -> Result<()> {
        self.storage
            .remove(FAVORITES_KEY)
            .map_err(|e| Error::StorageWrite(e.to_string()))?;

        debug!("cleared favorites");
        self.notify(FavoritesEvent::Cleared);
        Ok(())
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        let mut subscribers = self.subscribers.borrow_mut();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.senders.push((id, sender));

        Subscription {
            id,
            receiver,
            registry: Rc::downgrade(&self.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().senders.len()
    }

    fn read(&self) -> Result<Vec<FavoriteRecord>> {
        let raw = self
            .storage
            .get(FAVORITES_KEY)
            .map_err(|e| Error::StorageRead(e.to_string()))?;

        match raw {
            Some(data) => {
                serde_json::from_str(&data).map_err(|e| Error::StorageRead(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, records: &[FavoriteRecord]) -> Result<()> {
        let data =
            serde_json::to_string(records).map_err(|e| Error::StorageWrite(e.to_string()))?;
        self.storage
            .set(FAVORITES_KEY, &data)
            .map_err(|e| Error::StorageWrite(e.to_string()))
    }

    fn notify(&self, event: FavoritesEvent) {
        self.subscribers
            .borrow_mut()
            .senders
            .retain(|(_, sender)| sender.send(event.clone()).is_ok());
    }
}

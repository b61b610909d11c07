mod database;
mod favorites_store;
mod memory_store;

pub use database::{Connection, Database, SqliteStore};
pub use favorites_store::{FavoritesEvent, FavoritesStore, Subscription, FAVORITES_KEY};
pub use memory_store::MemoryStore;

use crate::Result;

/// String key-value storage, the shape of the platform's async storage.
///
/// Implementations take `&self` and manage their own interior mutability;
/// callers are single-threaded.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

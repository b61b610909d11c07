use crate::{Error, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::KeyValueStore;

#[derive(Default)]
struct Inner {
    values: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

/// In-memory key-value store for tests and dependency injection.
///
/// Clones share the same underlying map, so a test can keep a handle to
/// corrupt values or inject failures after handing the store to a consumer.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.set(fail);
    }

    /// Make every subsequent `set`/`remove` fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.set(fail);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.values.borrow().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.inner
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.inner.fail_reads.get() {
            return Err(Error::StorageRead("storage unavailable".to_string()));
        }
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.inner.fail_writes.get() {
            return Err(Error::StorageWrite("storage unavailable".to_string()));
        }
        self.put_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.inner.fail_writes.get() {
            return Err(Error::StorageWrite("storage unavailable".to_string()));
        }
        self.inner.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(handle.raw("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_injected_failures() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(matches!(store.set("k", "v"), Err(Error::StorageWrite(_))));
        assert!(matches!(store.remove("k"), Err(Error::StorageWrite(_))));

        store.set_fail_reads(true);
        assert!(matches!(store.get("k"), Err(Error::StorageRead(_))));
    }
}

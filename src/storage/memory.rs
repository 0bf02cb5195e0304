use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use crate::errors::{LedgerError, Result};

use super::KeyValueStore;

#[derive(Debug, Default)]
struct Shared {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

/// In-process store.
///
/// Clones share the same underlying map, so a caller can keep a handle while
/// the ledger owns another one and inspect what was persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `entries`. Seeding does not count as writes.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            shared: Arc::new(Shared {
                entries: Mutex::new(map),
                writes: AtomicUsize::new(0),
            }),
        }
    }

    /// Number of successful `set` calls since creation.
    pub fn write_count(&self) -> usize {
        self.shared.writes.load(Ordering::SeqCst)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .shared
            .entries
            .lock()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self
            .shared
            .entries
            .lock()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .shared
            .entries
            .lock()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))?;
        map.insert(key.to_string(), value.to_string());
        self.shared.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

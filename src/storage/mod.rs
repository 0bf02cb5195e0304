//! Key-value persistence used by the ledger.
//!
//! The ledger only ever needs synchronous `get`/`set` of whole documents by
//! string key, so backends implement [`KeyValueStore`] and nothing else.

pub mod json_backend;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::Result;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// Key holding the serialized transaction collection.
pub const TRANSACTIONS_KEY: &str = "budgetTransactions";
/// Key holding the savings goal scalar.
pub const SAVINGS_GOAL_KEY: &str = "savingsGoal";
/// Key holding the UI theme (`"dark"` or `"light"`).
pub const THEME_KEY: &str = "theme";

/// Opaque synchronous string store that survives process restarts.
pub trait KeyValueStore: Send {
    /// Returns the raw value stored under `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Reads and deserializes the JSON document stored under `key`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serializes `value` as JSON and stores it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

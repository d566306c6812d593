//! Namespaced key-value settings storage
//!
//! [`SettingsStore`] is the capability the [`ConfigStore`](crate::ConfigStore)
//! persists through. One store instance represents one namespace.

use crate::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// String key-value storage for a single namespace
///
/// Writes are last-write-wins per key. Implementations give no atomicity
/// across different keys.
pub trait SettingsStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if it was never set
    fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn put_string(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Read `key` and store `update`'s result in one step
    ///
    /// `update` receives the current value and returns the value that should
    /// be stored. No other write to this namespace can land in between. The
    /// store is only written when the value changes. Returns the stored value.
    fn update_string(
        &self,
        key: &str,
        update: &mut dyn FnMut(Option<&str>) -> String,
    ) -> Result<String>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for Arc<S> {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        (**self).get_string(key)
    }

    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        (**self).put_string(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn update_string(
        &self,
        key: &str,
        update: &mut dyn FnMut(Option<&str>) -> String,
    ) -> Result<String> {
        (**self).update_string(key, update)
    }
}

/// In-memory settings store that lives as long as the value does
///
/// # Example
///
/// ```rust
/// use switchboard::{MemoryStore, SettingsStore};
///
/// let store = MemoryStore::new();
/// assert_eq!(store.get_string("key")?, None);
///
/// store.put_string("key", "value")?;
/// assert_eq!(store.get_string("key")?, Some("value".to_string()));
/// # Ok::<(), switchboard::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }

    fn update_string(
        &self,
        key: &str,
        update: &mut dyn FnMut(Option<&str>) -> String,
    ) -> Result<String> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let value = update(values.get(key).map(String::as_str));
        values.insert(key.to_string(), value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get_string("absent").unwrap(), None);
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.put_string("k", "first").unwrap();
        store.put_string("k", "second").unwrap();
        assert_eq!(store.get_string("k").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_memory_store_remove() {
        let store = MemoryStore::new();
        store.put_string("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("never-set").unwrap();
        assert_eq!(store.get_string("k").unwrap(), None);
    }

    #[test]
    fn test_update_string_sees_current_value() {
        let store = MemoryStore::new();

        let first = store
            .update_string("k", &mut |current: Option<&str>| {
                current.unwrap_or("fresh").to_string()
            })
            .unwrap();
        assert_eq!(first, "fresh");

        let second = store
            .update_string("k", &mut |current: Option<&str>| {
                current.unwrap_or("other").to_string()
            })
            .unwrap();
        assert_eq!(second, "fresh");
        assert_eq!(store.get_string("k").unwrap(), Some("fresh".to_string()));
    }

    #[test]
    fn test_shared_store_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let other = Arc::clone(&store);
        other.put_string("k", "v").unwrap();
        assert_eq!(store.get_string("k").unwrap(), Some("v".to_string()));
    }
}

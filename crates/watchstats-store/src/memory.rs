//! In-process store, primarily for tests and embedding.

use std::collections::HashMap;

use crate::quota::{entry_size, reserve};
use crate::{KeyValueStore, StoreError, DEFAULT_CAPACITY_BYTES};

#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    capacity: u64,
    used: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY_BYTES)
    }
}

impl MemoryStore {
    #[must_use]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            used: 0,
        }
    }

    #[must_use]
    pub fn used_bytes(&self) -> u64 {
        self.used
    }

    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let old = self
            .entries
            .get(key)
            .map_or(0, |existing| entry_size(key, existing));
        self.used = reserve(key, self.used, old, entry_size(key, value), self.capacity)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if let Some(old) = self.entries.remove(key) {
            self.used = self.used.saturating_sub(entry_size(key, &old));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_remove() {
        let mut store = MemoryStore::default();
        store.put("a", "one").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("one"));
        assert_eq!(store.used_bytes(), 4);

        store.remove("a").unwrap();
        assert!(store.get("a").unwrap().is_none());
        assert_eq!(store.used_bytes(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn overwrite_accounts_for_previous_value() {
        let mut store = MemoryStore::with_capacity(10);
        store.put("k", "123456789").unwrap();
        // Same size again fits because the old value is released.
        store.put("k", "abcdefghi").unwrap();
        assert_eq!(store.used_bytes(), 10);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejected_write_leaves_store_untouched() {
        let mut store = MemoryStore::with_capacity(8);
        store.put("k", "small").unwrap();
        let err = store.put("k", "much too large").unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded { .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
        assert_eq!(store.used_bytes(), 6);
    }

    #[test]
    fn removing_missing_key_is_a_no_op() {
        let mut store = MemoryStore::default();
        store.remove("absent").unwrap();
        assert_eq!(store.used_bytes(), 0);
    }
}

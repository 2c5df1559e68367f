//! Keyed TTL Store Module
//!
//! Single-entry and keyed stores applying a TTL class lazily on read.
//! Used by the Short-class domains (subscription list, favorites page,
//! hot events, per-source article lists, subscription timelines) and the
//! Medium-class word-cloud results.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use chrono::Utc;

use crate::cache::{CacheEntry, TtlClass};

// == TTL Slot ==
/// Holds at most one entry of a TTL class.
#[derive(Debug)]
pub struct TtlSlot<T> {
    class: TtlClass,
    entry: Option<CacheEntry<T>>,
}

impl<T> TtlSlot<T> {
    /// Creates an empty slot for the given class.
    pub fn new(class: TtlClass) -> Self {
        Self { class, entry: None }
    }

    /// Returns the cached data if present and valid.
    ///
    /// A present-but-expired entry is evicted and reported absent. The
    /// call is idempotent: a second read of the same expired entry
    /// observes plain absence with no further side effect.
    pub fn get(&mut self) -> Option<&T> {
        let now = Utc::now();
        let expired = self
            .entry
            .as_ref()
            .map_or(false, |entry| !entry.is_valid(self.class, now));
        if expired {
            self.entry = None;
        }
        self.entry.as_ref().map(|entry| &entry.data)
    }

    /// Replaces the entry wholesale and resets its timestamp.
    pub fn set(&mut self, data: T) {
        self.entry = Some(CacheEntry::new(data));
    }

    /// Rewrites the cached data in place and refreshes the timestamp.
    ///
    /// No-op when the slot is vacant; expiry is deliberately not checked
    /// here, so a mutation on a stale-but-present entry revalidates it the
    /// same way a full `set` would.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        if let Some(entry) = self.entry.take() {
            let mut data = entry.data;
            f(&mut data);
            self.entry = Some(CacheEntry::new(data));
        }
    }

    /// True when no entry is stored, expired or not.
    pub fn is_vacant(&self) -> bool {
        self.entry.is_none()
    }

    /// Drops the entry.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

// == TTL Map ==
/// Keyed store applying one TTL class to every entry.
#[derive(Debug)]
pub struct TtlMap<K, T> {
    class: TtlClass,
    entries: HashMap<K, CacheEntry<T>>,
}

impl<K: Eq + Hash, T> TtlMap<K, T> {
    /// Creates an empty map for the given class.
    pub fn new(class: TtlClass) -> Self {
        Self {
            class,
            entries: HashMap::new(),
        }
    }

    /// Returns the data under `key` if present and valid.
    ///
    /// Evicts and reports absent when the entry has expired; a pure no-op
    /// when the key is absent.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let now = Utc::now();
        let expired = self
            .entries
            .get(key)
            .map_or(false, |entry| !entry.is_valid(self.class, now));
        if expired {
            self.entries.remove(key);
        }
        self.entries.get(key).map(|entry| &entry.data)
    }

    /// Replaces the entry under `key` wholesale, resetting its timestamp.
    pub fn insert(&mut self, key: K, data: T) {
        self.entries.insert(key, CacheEntry::new(data));
    }

    /// Removes the entry under `key`, expired or not.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.remove(key);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_slot_set_and_get() {
        let mut slot = TtlSlot::new(TtlClass::Short);

        assert!(slot.get().is_none());
        slot.set(vec![1, 2, 3]);
        assert_eq!(slot.get(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_slot_expired_entry_is_evicted() {
        let mut slot = TtlSlot::new(TtlClass::Short);
        slot.entry = Some(CacheEntry::with_timestamp(
            "stale",
            Utc::now() - Duration::minutes(6),
        ));

        assert!(slot.get().is_none());
        // Eviction happened on the first read
        assert!(slot.is_vacant());
        // Second read is a pure no-op
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_slot_set_revalidates_after_expiry() {
        let mut slot = TtlSlot::new(TtlClass::Short);
        slot.entry = Some(CacheEntry::with_timestamp(
            "stale",
            Utc::now() - Duration::minutes(6),
        ));

        slot.set("fresh");
        assert_eq!(slot.get(), Some(&"fresh"));
    }

    #[test]
    fn test_slot_update_mutates_and_refreshes() {
        let mut slot = TtlSlot::new(TtlClass::Short);
        slot.entry = Some(CacheEntry::with_timestamp(
            vec![1, 2],
            Utc::now() - Duration::minutes(4),
        ));
        let old_timestamp = slot.entry.as_ref().unwrap().timestamp;

        slot.update(|items| items.push(3));

        assert_eq!(slot.get(), Some(&vec![1, 2, 3]));
        assert!(slot.entry.as_ref().unwrap().timestamp > old_timestamp);
    }

    #[test]
    fn test_slot_update_on_vacant_is_noop() {
        let mut slot: TtlSlot<Vec<u32>> = TtlSlot::new(TtlClass::Short);

        slot.update(|items| items.push(1));

        assert!(slot.is_vacant());
    }

    #[test]
    fn test_map_keys_are_independent() {
        let mut map = TtlMap::new(TtlClass::Medium);

        map.insert(1u64, "one");
        map.insert(2u64, "two");
        map.entries.insert(
            3u64,
            CacheEntry::with_timestamp("stale", Utc::now() - Duration::hours(13)),
        );

        assert_eq!(map.get(&1), Some(&"one"));
        assert!(map.get(&3).is_none());
        assert_eq!(map.get(&2), Some(&"two"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_map_get_absent_is_noop() {
        let mut map: TtlMap<u64, &str> = TtlMap::new(TtlClass::Short);

        assert!(map.get(&42).is_none());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_map_insert_replaces_entry() {
        let mut map = TtlMap::new(TtlClass::Short);

        map.insert("k".to_string(), 1);
        map.insert("k".to_string(), 2);

        assert_eq!(map.get(&"k".to_string()), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_map_remove_and_clear() {
        let mut map = TtlMap::new(TtlClass::Short);
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);

        map.remove(&"a".to_string());
        assert!(map.get(&"a".to_string()).is_none());

        map.clear();
        assert_eq!(map.len(), 0);
    }
}

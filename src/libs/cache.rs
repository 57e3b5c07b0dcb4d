//! Time-bounded memoization of computed values.
//!
//! Entries are never evicted in the background. A lookup simply ignores an
//! entry that is [stale](Entry::stale_after), and the owner clears the cache
//! when the underlying data changes.
//!
//! Every [`Cache::clear`] starts a new generation. A value computed outside
//! the lock is stored with [`Cache::insert_if_current`], which refuses it when
//! the cache was cleared since the computation began.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Entry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> Entry<V> {
    pub fn value(&self) -> &V {
        &self.value
    }

    /// True once `ttl` has elapsed between storing the entry and `now`.
    pub fn stale_after(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) >= ttl
    }
}

#[derive(Debug)]
pub struct Cache<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
    generation: u64,
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
            generation: 0,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Looks `key` up as of `now`. Stale entries are treated as absent.
    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| !entry.stale_after(self.ttl, now))
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(key, Entry { value, stored_at: now });
    }

    /// Stores `value` unless the cache was cleared after `generation` was read.
    pub fn insert_if_current(&mut self, generation: u64, key: K, value: V) -> bool {
        if generation != self.generation {
            return false;
        }
        self.insert(key, value);
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

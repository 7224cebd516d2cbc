// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded least-recently-used cache of resolved queries.
//!
//! Search-as-you-type repeats the same few queries constantly, so the
//! resolved id lists are kept in an LRU of fixed capacity. A hit promotes
//! the entry; an insert past capacity evicts exactly one entry, the least
//! recently used. Ids point into the engine's record list, which is why the
//! cache must be cleared whenever that list is rebuilt.

use crate::index::RecordId;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Entries kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 50;

pub struct ResultCache {
    entries: LruCache<String, Vec<RecordId>>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ResultCache {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Cached ids for `key`, promoting the entry to most recent.
    pub fn get(&mut self, key: &str) -> Option<&[RecordId]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Presence check that leaves recency untouched.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Insert or replace. Evicts the least recently used entry when full.
    pub fn put(&mut self, key: String, ids: Vec<RecordId>) {
        self.entries.put(key, ids);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

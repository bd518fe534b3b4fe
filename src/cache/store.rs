//! Response Cache Module
//!
//! Query-keyed store of serialized responses with TTL, LRU capacity and
//! explicit invalidation.
//!
//! Lookups take `&self`: hit and miss counters are atomic and a hit only
//! stamps an access tick on its entry. Recency is reconciled lazily when a
//! new key needs room, so readers never contend on the LRU order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::cache::{
    CacheCounters, CacheEntry, CacheStats, LruTracker, ITEM_KEY_PREFIX, MAX_KEY_LENGTH,
    MAX_VALUE_SIZE,
};
use crate::error::{CatalogError, Result};

/// Cache key for a single product.
pub fn item_key(id: &str) -> String {
    format!("{}{}", ITEM_KEY_PREFIX, id)
}

// == Response Cache ==
/// In-memory response cache. Each mutation is a single map operation, so a
/// replace is never partially visible.
#[derive(Debug)]
pub struct ResponseCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Keys ordered by last recorded access
    lru: LruTracker,
    /// Source of access ticks
    clock: AtomicU64,
    /// Performance statistics
    counters: CacheCounters,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `max_entries` (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            clock: AtomicU64::new(0),
            counters: CacheCounters::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Get ==
    /// Looks up and decodes a fresh entry.
    ///
    /// An expired entry is a miss; it stays until [`ResponseCache::evict_expired`]
    /// or a replacing set. An entry whose payload does not decode as `T` is
    /// reported as [`CatalogError::CacheBackend`].
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get_at(key, Utc::now())
    }

    fn get_at<T: DeserializeOwned>(&self, key: &str, now: DateTime<Utc>) -> Result<Option<T>> {
        let entry = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => entry,
            _ => {
                self.counters.record_miss();
                return Ok(None);
            }
        };

        match serde_json::from_str::<T>(&entry.value) {
            Ok(value) => {
                self.counters.record_hit();
                entry.mark_accessed(self.next_tick());
                Ok(Some(value))
            }
            Err(err) => {
                self.counters.record_miss();
                Err(CatalogError::CacheBackend(format!(
                    "undecodable entry '{}': {}",
                    key, err
                )))
            }
        }
    }

    // == Set ==
    /// Serializes and stores `value` under `key`, replacing any previous entry.
    ///
    /// When a new key arrives at capacity, the least recently used entry is
    /// evicted first.
    pub fn set<T: Serialize>(&mut self, key: String, value: &T, ttl: u64) -> Result<()> {
        self.set_at(key, value, ttl, Utc::now())
    }

    fn set_at<T: Serialize>(
        &mut self,
        key: String,
        value: &T,
        ttl: u64,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CatalogError::CacheBackend(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        let encoded = serde_json::to_string(value)
            .map_err(|err| CatalogError::CacheBackend(format!("encode failed: {}", err)))?;
        if encoded.len() > MAX_VALUE_SIZE {
            return Err(CatalogError::CacheBackend(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_least_recent();
        }

        let tick = self.next_tick();
        self.lru.record(&key, tick);
        self.entries
            .insert(key, CacheEntry::new(encoded, ttl, now, tick));
        Ok(())
    }

    /// Pops candidates oldest first. A candidate hit since it was recorded is
    /// moved to its hit tick and the walk continues.
    fn evict_least_recent(&mut self) {
        while let Some((tick, key)) = self.lru.pop_oldest() {
            match self.entries.get(&key) {
                Some(entry) if entry.last_access() > tick => {
                    self.lru.record(&key, entry.last_access());
                }
                Some(_) => {
                    self.entries.remove(&key);
                    self.counters.record_eviction();
                    return;
                }
                None => {}
            }
        }
    }

    fn next_tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    // == Evict ==
    /// Drops `key` if its entry has expired.
    pub fn evict_expired(&mut self, key: &str) -> bool {
        self.evict_expired_at(key, Utc::now())
    }

    fn evict_expired_at(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now));
        expired && self.remove(key)
    }

    /// Drops `key` regardless of freshness.
    pub fn discard(&mut self, key: &str) -> bool {
        self.remove(key)
    }

    // == Invalidate All ==
    /// Drops every entry: listing pages, single products and summaries.
    pub fn invalidate_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.counters.record_invalidations(count);
        count
    }

    // == Invalidate Id ==
    /// Drops the `product:<id>` entry, if any.
    pub fn invalidate_id(&mut self, id: &str) -> bool {
        let removed = self.remove(&item_key(id));
        if removed {
            self.counters.record_invalidations(1);
        }
        removed
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Utc::now())
    }

    fn cleanup_expired_at(&mut self, now: DateTime<Utc>) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }
        expired.len()
    }

    fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
        }
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! LRU Tracker Module
//!
//! Orders cache keys by access tick for capacity eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Keys ordered by the tick they were last recorded at.
///
/// Hits are not recorded here; the cache stamps them on the entry and calls
/// [`LruTracker::record`] again when an eviction candidate turns out to have
/// been read since.
#[derive(Debug, Default)]
pub struct LruTracker {
    ticks: HashMap<String, u64>,
    by_tick: BTreeMap<u64, String>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Moves `key` to `tick`. Ticks must be unique across keys.
    pub fn record(&mut self, key: &str, tick: u64) {
        if let Some(previous) = self.ticks.insert(key.to_string(), tick) {
            self.by_tick.remove(&previous);
        }
        self.by_tick.insert(tick, key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.by_tick.remove(&tick);
        }
    }

    // == Pop Oldest ==
    /// Removes and returns the key with the lowest tick.
    pub fn pop_oldest(&mut self) -> Option<(u64, String)> {
        let (tick, key) = self.by_tick.pop_first()?;
        self.ticks.remove(&key);
        Some((tick, key))
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.ticks.clear();
        self.by_tick.clear();
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }
}

//! Cache Entry Module
//!
//! A serialized response payload with its insertion time and TTL.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};

/// Longest honoured TTL: 100 years.
pub const MAX_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

// == Cache Entry ==
/// Represents a single cached response.
#[derive(Debug)]
pub struct CacheEntry {
    /// Serialized JSON payload
    pub value: String,
    /// When the entry was stored
    pub inserted_at: DateTime<Utc>,
    /// Lifetime in seconds
    pub ttl: u64,
    /// Access tick of the last write or hit
    last_access: AtomicU64,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(value: String, ttl: u64, inserted_at: DateTime<Utc>, tick: u64) -> Self {
        Self {
            value,
            inserted_at,
            ttl,
            last_access: AtomicU64::new(tick),
        }
    }

    // == Access Tick ==
    pub fn last_access(&self) -> u64 {
        self.last_access.load(Ordering::Relaxed)
    }

    /// Stamps a hit. Callable through a shared reference.
    pub fn mark_accessed(&self, tick: u64) {
        self.last_access.fetch_max(tick, Ordering::Relaxed);
    }

    // == Expires At ==
    /// TTLs longer than [`MAX_TTL_SECS`] are capped.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.inserted_at + Duration::seconds(self.ttl.min(MAX_TTL_SECS) as i64)
    }

    // == Is Expired ==
    /// An entry expires once `now` is strictly past `inserted_at + ttl`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    // == Time To Live ==
    /// Remaining lifetime in whole seconds, 0 once expired.
    pub fn ttl_remaining_at(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at() - now).num_seconds().max(0) as u64
    }
}

//! Cache Module
//!
//! Provides the in-memory response cache with TTL expiration, LRU capacity
//! and explicit invalidation.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::{CacheCounters, CacheStats};
pub use store::{item_key, ResponseCache};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed serialized value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Prefix of every single-product cache key
pub const ITEM_KEY_PREFIX: &str = "product:";

/// Cache key of the category summary
pub const CATEGORIES_KEY: &str = "categories";

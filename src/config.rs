//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the response cache can hold
    pub cache_max_entries: usize,
    /// TTL in seconds for cached listing pages
    pub list_ttl: u64,
    /// TTL in seconds for cached single products and category summaries
    pub item_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Load the demo catalog on startup
    pub seed_demo_data: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `LIST_TTL` - Listing page TTL in seconds (default: 600)
    /// - `ITEM_TTL` - Single product TTL in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - `SEED_DEMO_DATA` - `true`/`1` to seed the demo catalog (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            list_ttl: env_or("LIST_TTL", defaults.list_ttl),
            item_ttl: env_or("ITEM_TTL", defaults.item_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.seed_demo_data),
        }
    }
}

fn env_or<T: FromStr>(name: &str, fallback: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_max_entries: 1000,
            list_ttl: 600,
            item_ttl: 3600,
            cleanup_interval: 30,
            seed_demo_data: false,
        }
    }
}

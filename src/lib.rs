//! Catalog Cache - A product catalog service with a consistent response cache
//!
//! Serves filtered, sorted, paginated product listings through a query-keyed
//! cache that is flushed by every write before the write is acknowledged.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use coordinator::CacheCoordinator;
pub use error::{CatalogError, Result};
pub use tasks::spawn_cleanup_task;

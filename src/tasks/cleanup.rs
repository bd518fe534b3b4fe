//! TTL Cleanup Task
//!
//! Background task that periodically removes expired response cache entries.
//! Expired entries are already ignored on read; the sweep reclaims memory held
//! by keys nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::coordinator::CacheCoordinator;

/// Spawns a background task that sweeps expired cache entries every
/// `cleanup_interval_secs` seconds (minimum 1).
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    catalog: Arc<CacheCoordinator>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = catalog.cleanup_expired().await;
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

use super::storage::{purge_expired, EntryMap};
use super::CacheMetrics;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periodic expiry sweep over the cache entries.
pub struct CacheSweeper {
    entries: Arc<EntryMap>,
    metrics: Arc<CacheMetrics>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl CacheSweeper {
    pub(super) fn new(
        entries: Arc<EntryMap>,
        metrics: Arc<CacheMetrics>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            entries,
            metrics,
            interval,
            shutdown,
        }
    }

    /// Starts the sweep on the current runtime. Outside a runtime the cache
    /// relies on lazy expiry and explicit cleanup only.
    pub fn spawn(self) -> bool {
        let Ok(handle) = Handle::try_current() else {
            warn!("No tokio runtime available, cache background sweep disabled");
            return false;
        };

        handle.spawn(self.run());
        true
    }

    async fn run(self) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting cache sweep"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Cache sweep: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let removed = purge_expired(&self.entries, &self.metrics);
                    if removed > 0 {
                        debug!(
                            removed,
                            remaining = self.entries.len(),
                            "Cache sweep removed expired entries"
                        );
                    }
                }
            }
        }
    }
}

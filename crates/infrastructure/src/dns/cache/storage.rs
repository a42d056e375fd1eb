use super::entry::CacheEntry;
use super::key::CacheKey;
use super::sweeper::CacheSweeper;
use super::CacheMetrics;
use dashmap::DashMap;
use ferrous_resolve_application::ports::{CacheStats, DnsCachePort};
use ferrous_resolve_domain::config::CacheConfig;
use ferrous_resolve_domain::{normalize_domain, DnsQuery, DnsResponse, RecordType};
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub(super) type EntryMap = DashMap<CacheKey, CacheEntry, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct DnsCacheConfig {
    pub default_ttl: Duration,
    pub max_entries: usize,
    /// `None` disables the background sweep.
    pub cleanup_interval: Option<Duration>,
    pub shard_amount: usize,
}

impl Default for DnsCacheConfig {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for DnsCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            default_ttl: Duration::from_secs(config.default_ttl_secs as u64),
            max_entries: config.max_entries.max(1),
            cleanup_interval: (config.cleanup_interval_secs > 0)
                .then(|| Duration::from_secs(config.cleanup_interval_secs)),
            shard_amount: config.shard_amount,
        }
    }
}

/// Response cache keyed by normalized domain and record type.
///
/// Expired entries are dropped lazily on read, by [`DnsCache::cleanup`] and by
/// the background sweep started when the cache is built inside a tokio
/// runtime. Concurrent writes to one key are last-write-wins.
pub struct DnsCache {
    entries: Arc<EntryMap>,
    default_ttl: Duration,
    max_entries: usize,
    metrics: Arc<CacheMetrics>,
    shutdown: CancellationToken,
}

impl DnsCache {
    pub fn new(config: DnsCacheConfig) -> Self {
        info!(
            max_entries = config.max_entries,
            default_ttl_secs = config.default_ttl.as_secs(),
            cleanup_interval_secs = config.cleanup_interval.map(|d| d.as_secs()),
            "Initializing DNS cache"
        );

        let shard_amount = config.shard_amount.max(2).next_power_of_two();
        let entries = DashMap::with_capacity_and_hasher_and_shard_amount(
            config.max_entries.min(1024),
            FxBuildHasher,
            shard_amount,
        );

        let cache = Self {
            entries: Arc::new(entries),
            default_ttl: config.default_ttl,
            max_entries: config.max_entries.max(1),
            metrics: Arc::new(CacheMetrics::default()),
            shutdown: CancellationToken::new(),
        };

        if let Some(interval) = config.cleanup_interval {
            CacheSweeper::new(
                Arc::clone(&cache.entries),
                Arc::clone(&cache.metrics),
                interval,
                cache.shutdown.clone(),
            )
            .spawn();
        }

        cache
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_destroyed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Makes room for one new key: expired entries first, then whichever
    /// entry expires soonest.
    fn make_room(&self) {
        if purge_expired(&self.entries, &self.metrics) > 0 && self.entries.len() < self.max_entries
        {
            return;
        }

        while self.entries.len() >= self.max_entries {
            let victim = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().expires_at)
                .map(|entry| entry.key().clone());

            match victim {
                Some(key) => {
                    if self.entries.remove(&key).is_some() {
                        self.metrics.evictions.fetch_add(1, AtomicOrdering::Relaxed);
                        debug!(
                            domain = %key.domain,
                            record_type = %key.record_type,
                            "Evicted cache entry"
                        );
                    }
                }
                None => break,
            }
        }
    }
}

/// Removes every expired entry; shared with the background sweep.
pub(super) fn purge_expired(entries: &EntryMap, metrics: &CacheMetrics) -> usize {
    let now = Instant::now();
    let mut removed = 0usize;
    entries.retain(|_, entry| {
        let keep = !entry.is_expired_at(now);
        if !keep {
            removed += 1;
        }
        keep
    });

    if removed > 0 {
        metrics
            .expirations
            .fetch_add(removed as u64, AtomicOrdering::Relaxed);
    }
    removed
}

impl DnsCachePort for DnsCache {
    fn get(&self, query: &DnsQuery) -> Option<DnsResponse> {
        let key = CacheKey::from_query(query);
        let now = Instant::now();

        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired_at(now) {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                return Some(entry.response.clone());
            }
            drop(entry);

            if self
                .entries
                .remove_if(&key, |_, entry| entry.is_expired_at(now))
                .is_some()
            {
                self.metrics.expirations.fetch_add(1, AtomicOrdering::Relaxed);
            }
        }

        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        None
    }

    fn set(&self, query: &DnsQuery, response: DnsResponse) {
        let key = CacheKey::from_query(query);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.make_room();
        }

        let entry = CacheEntry::new(response, self.default_ttl);
        debug!(
            domain = %key.domain,
            record_type = %key.record_type,
            ttl_secs = entry.remaining_ttl().as_secs(),
            "Inserted response into cache"
        );
        self.entries.insert(key, entry);
        self.metrics.sets.fetch_add(1, AtomicOrdering::Relaxed);
    }

    fn invalidate(&self, domain: Option<&str>, record_type: Option<RecordType>) -> usize {
        let domain = domain.map(normalize_domain);

        if domain.is_none() && record_type.is_none() {
            let removed = self.entries.len();
            self.entries.clear();
            info!(removed, "Cache invalidated");
            return removed;
        }

        let mut removed = 0usize;
        self.entries.retain(|key, _| {
            let hit = key.matches(domain.as_deref(), record_type);
            if hit {
                removed += 1;
            }
            !hit
        });

        info!(
            domain = domain.as_deref().unwrap_or("*"),
            record_type = record_type.map(|rt| rt.as_str()).unwrap_or("*"),
            removed,
            "Cache invalidated"
        );
        removed
    }

    fn cleanup(&self) -> usize {
        let removed = purge_expired(&self.entries, &self.metrics);
        debug!(removed, remaining = self.entries.len(), "Cache cleanup");
        removed
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.metrics.hits.load(AtomicOrdering::Relaxed),
            misses: self.metrics.misses.load(AtomicOrdering::Relaxed),
            size: self.entries.len(),
            sets: self.metrics.sets.load(AtomicOrdering::Relaxed),
            evictions: self.metrics.evictions.load(AtomicOrdering::Relaxed),
            expirations: self.metrics.expirations.load(AtomicOrdering::Relaxed),
            hit_rate: self.metrics.hit_rate(),
        }
    }

    fn clear(&self) {
        self.entries.clear();
        self.metrics.reset_lookups();
        info!("Cache cleared");
    }

    fn destroy(&self) {
        if !self.shutdown.is_cancelled() {
            self.shutdown.cancel();
            info!("Cache destroyed");
        }
        self.entries.clear();
    }
}

impl Drop for DnsCache {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

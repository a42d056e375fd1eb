use ferrous_resolve_domain::{DnsQuery, DnsResponse, RecordType};
use serde::Serialize;

/// Snapshot of response cache counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub sets: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub hit_rate: f64,
}

/// Port for the (domain, type) response cache.
pub trait DnsCachePort: Send + Sync {
    /// Returns a live entry; an expired one counts as a miss and is dropped.
    fn get(&self, query: &DnsQuery) -> Option<DnsResponse>;

    fn set(&self, query: &DnsQuery, response: DnsResponse);

    /// Removes entries matching the filters; no filter clears everything.
    fn invalidate(&self, domain: Option<&str>, record_type: Option<RecordType>) -> usize;

    /// Sweeps expired entries.
    fn cleanup(&self) -> usize;

    fn stats(&self) -> CacheStats;

    fn clear(&self);

    /// Stops background maintenance and releases every entry.
    fn destroy(&self);
}

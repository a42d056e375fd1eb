pub mod entry;
pub mod key;
pub mod metrics;
pub mod storage;
pub mod sweeper;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use metrics::CacheMetrics;
pub use storage::{DnsCache, DnsCacheConfig};
pub use sweeper::CacheSweeper;

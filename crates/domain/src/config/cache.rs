use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// TTL applied to responses that carry no record TTL.
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u32,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Period of the background expiry sweep; 0 disables it.
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,

    #[serde(default = "default_shard_amount")]
    pub shard_amount: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            shard_amount: default_shard_amount(),
        }
    }
}

fn default_ttl_secs() -> u32 {
    300
}

fn default_max_entries() -> usize {
    10_000
}

fn default_cleanup_interval_secs() -> u64 {
    60
}

fn default_shard_amount() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    (cpus * 4).next_power_of_two().clamp(8, 256)
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TracerConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_hop_timeout_ms")]
    pub hop_timeout_ms: u64,

    #[serde(default = "default_true")]
    pub follow_to_end: bool,

    /// Worker pool size for batch traces.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            hop_timeout_ms: default_hop_timeout_ms(),
            follow_to_end: true,
            concurrency: default_concurrency(),
        }
    }
}

fn default_max_depth() -> usize {
    10
}

fn default_hop_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    5
}

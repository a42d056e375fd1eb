use crate::dns::cache::DnsCacheConfig;
use ferrous_resolve_application::use_cases::{BatchOptions, RetryPolicy, TraceOptions};
use ferrous_resolve_domain::Config;
use std::time::Duration;

/// Runtime resolver settings, built from the `[resolver]`, `[cache]` and
/// `[tracer]` sections of [`Config`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub servers: Vec<String>,

    pub query_timeout_ms: u64,

    /// Per-server round trip inside the provider.
    pub attempt_timeout_ms: u64,

    pub enable_cache: bool,

    pub cache: DnsCacheConfig,

    pub concurrency: usize,

    pub retry_on_error: bool,

    pub max_attempts: u32,

    pub initial_backoff_ms: u64,

    pub trace: TraceOptions,

    pub trace_concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ResolverConfig {
    pub fn from_config(config: &Config) -> Self {
        let resolver = &config.resolver;
        let tracer = &config.tracer;

        Self {
            servers: resolver.servers.clone(),
            query_timeout_ms: resolver.timeout_ms,
            attempt_timeout_ms: resolver.attempt_timeout_ms,
            enable_cache: resolver.enable_cache,
            cache: DnsCacheConfig::from(&config.cache),
            concurrency: resolver.concurrency,
            retry_on_error: resolver.retry_on_error,
            max_attempts: resolver.max_attempts,
            initial_backoff_ms: resolver.initial_backoff_ms,
            trace: TraceOptions::default()
                .with_max_depth(tracer.max_depth)
                .with_hop_timeout(Duration::from_millis(tracer.hop_timeout_ms))
                .with_follow_to_end(tracer.follow_to_end),
            trace_concurrency: tracer.concurrency,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.query_timeout_ms = timeout_ms;
        self
    }

    pub fn with_servers(mut self, servers: Vec<String>) -> Self {
        self.servers = servers;
        self
    }

    pub fn with_cache_enabled(mut self, enable_cache: bool) -> Self {
        self.enable_cache = enable_cache;
        self
    }

    pub fn with_cache(mut self, cache: DnsCacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::for_query_timeout(self.query_timeout())
            .with_max_attempts(self.max_attempts)
            .with_initial_backoff(Duration::from_millis(self.initial_backoff_ms))
    }

    /// Batch options used when the caller supplies none.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::default()
            .with_concurrency(self.concurrency)
            .with_retry_on_error(self.retry_on_error)
            .with_retry(self.retry_policy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_config_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.query_timeout_ms, 5000);
        assert_eq!(config.concurrency, 10);
        assert!(config.enable_cache);
        assert_eq!(config.servers, vec!["8.8.8.8:53", "1.1.1.1:53"]);
        assert_eq!(config.trace.max_depth, 10);
        assert_eq!(config.trace_concurrency, 5);
    }

    #[test]
    fn test_retry_attempt_bound_tracks_query_timeout() {
        let config = ResolverConfig::default().with_timeout(800);
        let policy = config.retry_policy();
        assert_eq!(policy.attempt_timeout, Duration::from_millis(1800));
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_millis(500));
    }

    #[test]
    fn test_batch_options_carry_concurrency() {
        let options = ResolverConfig::default().with_concurrency(3).batch_options();
        assert_eq!(options.concurrency, 3);
        assert!(options.retry_on_error);
    }
}

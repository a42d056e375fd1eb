use super::cache_layer::CachedResolver;
use super::config::ResolverConfig;
use super::core::CoreResolver;
use ferrous_resolve_application::ports::{
    DnsCachePort, DnsResolver, MetricsSink, NameResolutionProvider, NoopMetricsSink,
};
use std::sync::Arc;
use tracing::info;

/// Stacks the resolver layers: core, then the cache when one is given.
pub struct ResolverBuilder {
    provider: Arc<dyn NameResolutionProvider>,
    config: ResolverConfig,
    cache: Option<Arc<dyn DnsCachePort>>,
    metrics: Arc<dyn MetricsSink>,
}

impl ResolverBuilder {
    pub fn new(provider: Arc<dyn NameResolutionProvider>) -> Self {
        Self {
            provider,
            config: ResolverConfig::default(),
            cache: None,
            metrics: Arc::new(NoopMetricsSink),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn DnsCachePort>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn build(self) -> Arc<dyn DnsResolver> {
        info!(
            cache = self.cache.is_some(),
            timeout_ms = self.config.query_timeout_ms,
            "Building DNS resolver"
        );

        let mut resolver: Arc<dyn DnsResolver> = Arc::new(CoreResolver::new(
            self.provider,
            self.config.query_timeout(),
            Arc::clone(&self.metrics),
        ));

        if let Some(cache) = self.cache {
            resolver = Arc::new(CachedResolver::new(resolver, cache, self.metrics));
        }

        info!("DNS resolver built successfully");
        resolver
    }
}

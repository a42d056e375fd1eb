use crate::dns::cache::DnsCache;
use crate::dns::provider::HickoryProvider;
use crate::dns::resolver::{ResolverBuilder, ResolverConfig};
use ferrous_resolve_application::ports::{
    CacheStats, DnsCachePort, DnsResolver, MetricsSink, NameResolutionProvider, NoopMetricsSink,
};
use ferrous_resolve_application::use_cases::{
    BatchOptions, BatchResolveUseCase, CnameTracer, ResolveAllRecordsUseCase, TraceOptions,
};
use ferrous_resolve_domain::{
    CnameChainResult, Config, DnsQuery, DnsResponse, DomainError, RecordType,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Entry point of the resolution engine.
///
/// Owns its cache; two clients never share entries.
pub struct DnsClient {
    config: ResolverConfig,
    resolver: Arc<dyn DnsResolver>,
    cache: Option<Arc<DnsCache>>,
    batch: Arc<BatchResolveUseCase>,
    records: ResolveAllRecordsUseCase,
    tracer: CnameTracer,
}

impl DnsClient {
    pub fn builder(config: ResolverConfig) -> DnsClientBuilder {
        DnsClientBuilder::new(config)
    }

    /// Client with the wire-protocol provider for `config`.
    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        DnsClientBuilder::new(ResolverConfig::from_config(config)).build()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// `Err` only for record types the engine does not serve.
    pub async fn resolve(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<DnsResponse, DomainError> {
        self.resolve_query(&DnsQuery::new(domain, record_type))
            .await
    }

    /// Resolves a prepared query, keeping its upstream override.
    pub async fn resolve_query(&self, query: &DnsQuery) -> Result<DnsResponse, DomainError> {
        self.resolver.resolve(query).await
    }

    /// As [`DnsClient::resolve`], with the record type given as text.
    pub async fn resolve_str(
        &self,
        domain: &str,
        record_type: &str,
    ) -> Result<DnsResponse, DomainError> {
        let record_type: RecordType = record_type.parse()?;
        self.resolve(domain, record_type).await
    }

    pub async fn lookup_multiple(
        &self,
        domains: &[String],
        record_type: RecordType,
    ) -> Vec<DnsResponse> {
        let queries = domains
            .iter()
            .map(|domain| DnsQuery::new(domain, record_type))
            .collect();
        self.batch_resolve(queries).await
    }

    /// Batch with the configured concurrency and retry policy.
    pub async fn batch_resolve(&self, queries: Vec<DnsQuery>) -> Vec<DnsResponse> {
        self.batch
            .execute(queries, &self.config.batch_options())
            .await
    }

    pub async fn batch_resolve_optimized(
        &self,
        queries: Vec<DnsQuery>,
        options: &BatchOptions,
    ) -> Vec<DnsResponse> {
        self.batch.execute(queries, options).await
    }

    pub async fn resolve_all_records_for_domains(
        &self,
        domains: &[String],
        record_types: &[RecordType],
    ) -> BTreeMap<String, Vec<DnsResponse>> {
        self.records
            .execute(domains, record_types, &self.config.batch_options())
            .await
    }

    /// Resolves the CNAME record of `domain` and attaches the chain traced with
    /// the configured tracer limits. The full trace is returned alongside.
    pub async fn resolve_cname_with_chain(
        &self,
        domain: &str,
    ) -> Result<(DnsResponse, CnameChainResult), DomainError> {
        let query = DnsQuery::new(domain, RecordType::CNAME);
        let (response, trace) = tokio::join!(
            self.resolver.resolve(&query),
            self.tracer.trace(domain, &self.config.trace)
        );
        let response = response?.with_cname_chain(trace.chain.clone());
        Ok((response, trace))
    }

    pub async fn trace_cname(&self, domain: &str, options: &TraceOptions) -> CnameChainResult {
        self.tracer.trace(domain, options).await
    }

    pub async fn trace_many(
        &self,
        domains: &[String],
        options: &TraceOptions,
    ) -> Vec<CnameChainResult> {
        self.tracer
            .trace_many(domains, options, self.config.trace_concurrency)
            .await
    }

    /// Zeroed stats when caching is disabled.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .as_ref()
            .map(|cache| cache.stats())
            .unwrap_or_default()
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    pub fn invalidate_cache(
        &self,
        domain: Option<&str>,
        record_type: Option<RecordType>,
    ) -> usize {
        self.cache
            .as_ref()
            .map_or(0, |cache| cache.invalidate(domain, record_type))
    }

    pub fn cleanup_cache(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.cleanup())
    }

    /// Stops the cache sweep and drops every entry. Safe to call twice.
    pub fn destroy(&self) {
        if let Some(cache) = &self.cache {
            cache.destroy();
        }
    }
}

pub struct DnsClientBuilder {
    config: ResolverConfig,
    provider: Option<Arc<dyn NameResolutionProvider>>,
    metrics: Arc<dyn MetricsSink>,
}

impl DnsClientBuilder {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            provider: None,
            metrics: Arc::new(NoopMetricsSink),
        }
    }

    /// Replaces the wire-protocol provider.
    pub fn with_provider(mut self, provider: Arc<dyn NameResolutionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn build(self) -> Result<DnsClient, DomainError> {
        let provider: Arc<dyn NameResolutionProvider> = match self.provider {
            Some(provider) => provider,
            None => Arc::new(HickoryProvider::from_addresses(
                &self.config.servers,
                self.config.attempt_timeout(),
            )?),
        };

        let cache = self
            .config
            .enable_cache
            .then(|| Arc::new(DnsCache::new(self.config.cache.clone())));

        let mut resolver_builder = ResolverBuilder::new(Arc::clone(&provider))
            .with_config(self.config.clone())
            .with_metrics(self.metrics);
        if let Some(cache) = &cache {
            let cache: Arc<dyn DnsCachePort> = cache.clone();
            resolver_builder = resolver_builder.with_cache(cache);
        }
        let resolver = resolver_builder.build();

        let batch = Arc::new(BatchResolveUseCase::new(Arc::clone(&resolver)));
        let records = ResolveAllRecordsUseCase::new(Arc::clone(&batch));
        let tracer = CnameTracer::new(provider);

        info!(
            servers = self.config.servers.len(),
            cache = cache.is_some(),
            concurrency = self.config.concurrency,
            "DNS client ready"
        );

        Ok(DnsClient {
            config: self.config,
            resolver,
            cache,
            batch,
            records,
            tracer,
        })
    }
}

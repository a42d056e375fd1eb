use async_trait::async_trait;
use ferrous_resolve_application::ports::{DnsCachePort, DnsResolver, MetricsSink, ResolutionEvent};
use ferrous_resolve_domain::{DnsQuery, DnsResponse, DomainError, RecordType};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

const CACHE_SOURCE: &str = "response_cache";

/// Serves repeated queries from the response cache and stores successful
/// answers of the inner resolver. CAA answers bypass the cache and count as
/// misses. A hit is returned under the caller's query.
pub struct CachedResolver {
    inner: Arc<dyn DnsResolver>,
    cache: Arc<dyn DnsCachePort>,
    metrics: Arc<dyn MetricsSink>,
}

impl CachedResolver {
    pub fn new(
        inner: Arc<dyn DnsResolver>,
        cache: Arc<dyn DnsCachePort>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            inner,
            cache,
            metrics,
        }
    }

    fn check_cache(&self, query: &DnsQuery, start: Instant) -> Option<DnsResponse> {
        let cached = self.cache.get(query)?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            "Cache HIT"
        );

        self.metrics.record_dns_resolution(&ResolutionEvent {
            domain: Arc::clone(&query.domain),
            record_type: query.record_type,
            duration_ms: elapsed_ms,
            success: cached.is_success(),
            cached: true,
            error: None,
        });

        Some(
            DnsResponse {
                query: query.clone(),
                ..cached
            }
            .with_response_time(elapsed_ms),
        )
    }
}

#[async_trait]
impl DnsResolver for CachedResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResponse, DomainError> {
        if !query.record_type.is_resolvable() {
            return Err(DomainError::UnsupportedRecordType(
                query.record_type.to_string(),
            ));
        }

        if query.record_type == RecordType::CAA {
            self.metrics.record_cache_hit(false, CACHE_SOURCE);
            return self.inner.resolve(query).await;
        }

        let start = Instant::now();
        if let Some(response) = self.check_cache(query, start) {
            self.metrics.record_cache_hit(true, CACHE_SOURCE);
            return Ok(response);
        }

        self.metrics.record_cache_hit(false, CACHE_SOURCE);
        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            "Cache MISS"
        );

        let response = self.inner.resolve(query).await?;
        if response.is_success() {
            self.cache.set(query, response.clone());
        }

        Ok(response)
    }
}

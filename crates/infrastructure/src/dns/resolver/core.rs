use super::classify::{classify, timeout_message};
use super::record_mapper;
use async_trait::async_trait;
use ferrous_resolve_application::ports::{
    DnsResolver, LookupTarget, MetricsSink, NameResolutionProvider, ProviderError,
    ResolutionEvent,
};
use ferrous_resolve_domain::{
    DnsQuery, DnsRecord, DnsResponse, DomainError, RecordType, ResolutionErrorKind,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Innermost resolver: one provider call per query, bounded by the query
/// timeout, mapped into records or a classified failure.
pub struct CoreResolver {
    provider: Arc<dyn NameResolutionProvider>,
    query_timeout: Duration,
    metrics: Arc<dyn MetricsSink>,
}

impl CoreResolver {
    pub fn new(
        provider: Arc<dyn NameResolutionProvider>,
        query_timeout: Duration,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        info!(
            timeout_ms = query_timeout.as_millis() as u64,
            "Core DNS resolver created"
        );

        Self {
            provider,
            query_timeout,
            metrics,
        }
    }

    async fn lookup(
        &self,
        record_type: RecordType,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        let provider = self.provider.as_ref();
        let records = match record_type {
            RecordType::A | RecordType::AAAA => {
                let answers = if record_type == RecordType::A {
                    provider.resolve_a(target).await?
                } else {
                    provider.resolve_aaaa(target).await?
                };
                record_mapper::map_addresses(record_type, answers)
            }
            RecordType::CNAME => {
                record_mapper::map_names(record_type, provider.resolve_cname(target).await?)
            }
            RecordType::NS => {
                record_mapper::map_names(record_type, provider.resolve_ns(target).await?)
            }
            RecordType::PTR => {
                record_mapper::map_names(record_type, provider.resolve_ptr(target).await?)
            }
            RecordType::MX => record_mapper::map_mx(provider.resolve_mx(target).await?),
            RecordType::TXT => record_mapper::map_txt(provider.resolve_txt(target).await?),
            RecordType::SRV => record_mapper::map_srv(provider.resolve_srv(target).await?),
            RecordType::SOA => record_mapper::map_soa(provider.resolve_soa(target).await?),
            other => {
                return Err(ProviderError::other(format!(
                    "record type {} is not served by the provider",
                    other
                )))
            }
        };
        Ok(records)
    }

    fn report(&self, response: &DnsResponse) {
        self.metrics.record_dns_resolution(&ResolutionEvent {
            domain: Arc::clone(&response.query.domain),
            record_type: response.query.record_type,
            duration_ms: response.response_time_ms,
            success: response.is_success(),
            cached: false,
            error: response.error.clone(),
        });

        if let Some(error) = &response.error {
            self.metrics.record_error(error, "resolve");
        }
    }
}

#[async_trait]
impl DnsResolver for CoreResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResponse, DomainError> {
        if !query.record_type.is_resolvable() {
            return Err(DomainError::UnsupportedRecordType(
                query.record_type.to_string(),
            ));
        }

        let start = Instant::now();

        if query.record_type == RecordType::CAA {
            warn!(
                domain = %query.domain,
                "CAA lookups are not supported by the provider, returning no records"
            );
            let response = DnsResponse::success(query.clone(), Vec::new(), 0);
            self.report(&response);
            return Ok(response);
        }

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            "CoreResolver: performing upstream query"
        );

        let target = LookupTarget::new(&query.domain).with_server(query.server.as_deref());
        let outcome =
            tokio::time::timeout(self.query_timeout, self.lookup(query.record_type, &target))
                .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let response = match outcome {
            Ok(Ok(records)) => {
                debug!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    records = records.len(),
                    elapsed_ms,
                    "CoreResolver: query successful"
                );
                DnsResponse::success(query.clone(), records, elapsed_ms)
            }
            Ok(Err(e)) => {
                let (kind, message) = classify(&e);
                debug!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    kind = %kind,
                    error = %e,
                    "CoreResolver: query failed"
                );
                DnsResponse::failure(query.clone(), kind, message, elapsed_ms)
            }
            Err(_) => {
                warn!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    timeout_ms = self.query_timeout.as_millis() as u64,
                    "CoreResolver: query timed out"
                );
                DnsResponse::failure(
                    query.clone(),
                    ResolutionErrorKind::Timeout,
                    timeout_message(self.query_timeout),
                    elapsed_ms,
                )
            }
        };

        self.report(&response);
        Ok(response)
    }
}

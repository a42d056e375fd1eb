use ferrous_resolve_domain::RecordType;
use std::sync::Arc;

/// Outcome of one resolver call, as reported to metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionEvent {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub duration_ms: u64,
    pub success: bool,
    pub cached: bool,
    pub error: Option<String>,
}

/// Downstream observability sink.
///
/// Implementations must return promptly and never fail; the resolver calls
/// them inline on every lookup.
pub trait MetricsSink: Send + Sync {
    fn record_cache_hit(&self, hit: bool, source: &str);

    fn record_dns_resolution(&self, event: &ResolutionEvent);

    fn record_error(&self, error: &str, context: &str);
}

pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn record_cache_hit(&self, _hit: bool, _source: &str) {}

    fn record_dns_resolution(&self, _event: &ResolutionEvent) {}

    fn record_error(&self, _error: &str, _context: &str) {}
}

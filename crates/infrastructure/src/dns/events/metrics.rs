use super::MetricsEvent;
use dashmap::DashMap;
use ferrous_resolve_application::ports::{MetricsSink, ResolutionEvent};
use ferrous_resolve_domain::RecordType;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// In-process aggregation of resolver signals.
#[derive(Clone)]
pub struct ResolutionMetrics {
    total_resolutions: Arc<AtomicU64>,

    successful_resolutions: Arc<AtomicU64>,

    failed_resolutions: Arc<AtomicU64>,

    cached_resolutions: Arc<AtomicU64>,

    cache_hits: Arc<AtomicU64>,

    cache_misses: Arc<AtomicU64>,

    errors: Arc<AtomicU64>,

    total_duration_ms: Arc<AtomicU64>,

    domain_counts: Arc<DashMap<Arc<str>, u64>>,

    record_type_counts: Arc<DashMap<RecordType, u64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub total_resolutions: u64,
    pub successful_resolutions: u64,
    pub failed_resolutions: u64,
    pub cached_resolutions: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub errors: u64,
    pub success_rate: f64,
    pub avg_duration_ms: f64,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self {
            total_resolutions: Arc::new(AtomicU64::new(0)),
            successful_resolutions: Arc::new(AtomicU64::new(0)),
            failed_resolutions: Arc::new(AtomicU64::new(0)),
            cached_resolutions: Arc::new(AtomicU64::new(0)),
            cache_hits: Arc::new(AtomicU64::new(0)),
            cache_misses: Arc::new(AtomicU64::new(0)),
            errors: Arc::new(AtomicU64::new(0)),
            total_duration_ms: Arc::new(AtomicU64::new(0)),
            domain_counts: Arc::new(DashMap::new()),
            record_type_counts: Arc::new(DashMap::new()),
        }
    }

    /// Folds one emitted event into the counters.
    pub fn track(&self, event: &MetricsEvent) {
        match event {
            MetricsEvent::CacheLookup { hit, source } => self.record_cache_hit(*hit, source),
            MetricsEvent::Resolution(resolution) => self.record_dns_resolution(resolution),
            MetricsEvent::Error { error, context } => self.record_error(error, context),
        }
    }

    /// Drains `receiver` into these counters until every sender is dropped.
    pub fn spawn_consumer(
        &self,
        mut receiver: mpsc::UnboundedReceiver<MetricsEvent>,
    ) -> tokio::task::JoinHandle<()> {
        let metrics = self.clone();
        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                metrics.track(&event);
            }
        })
    }

    pub fn total_resolutions(&self) -> u64 {
        self.total_resolutions.load(Ordering::Relaxed)
    }

    pub fn successful_resolutions(&self) -> u64 {
        self.successful_resolutions.load(Ordering::Relaxed)
    }

    pub fn failed_resolutions(&self) -> u64 {
        self.failed_resolutions.load(Ordering::Relaxed)
    }

    pub fn cached_resolutions(&self) -> u64 {
        self.cached_resolutions.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total_resolutions();
        if total == 0 {
            return 0.0;
        }
        self.successful_resolutions() as f64 / total as f64
    }

    pub fn avg_duration_ms(&self) -> f64 {
        let total = self.total_resolutions();
        if total == 0 {
            return 0.0;
        }
        self.total_duration_ms.load(Ordering::Relaxed) as f64 / total as f64
    }

    pub fn domain_count(&self, domain: &str) -> u64 {
        self.domain_counts.get(domain).map(|v| *v).unwrap_or(0)
    }

    pub fn record_type_count(&self, record_type: RecordType) -> u64 {
        self.record_type_counts
            .get(&record_type)
            .map(|v| *v)
            .unwrap_or(0)
    }

    pub fn top_domains(&self, n: usize) -> Vec<(String, u64)> {
        let mut domains: Vec<_> = self
            .domain_counts
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect();

        domains.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        domains.truncate(n);
        domains
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_resolutions: self.total_resolutions(),
            successful_resolutions: self.successful_resolutions(),
            failed_resolutions: self.failed_resolutions(),
            cached_resolutions: self.cached_resolutions(),
            cache_hits: self.cache_hits(),
            cache_misses: self.cache_misses(),
            errors: self.errors(),
            success_rate: self.success_rate(),
            avg_duration_ms: self.avg_duration_ms(),
        }
    }

    pub fn reset(&self) {
        self.total_resolutions.store(0, Ordering::Relaxed);
        self.successful_resolutions.store(0, Ordering::Relaxed);
        self.failed_resolutions.store(0, Ordering::Relaxed);
        self.cached_resolutions.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
        self.total_duration_ms.store(0, Ordering::Relaxed);
        self.domain_counts.clear();
        self.record_type_counts.clear();
    }
}

impl MetricsSink for ResolutionMetrics {
    fn record_cache_hit(&self, hit: bool, _source: &str) {
        if hit {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_dns_resolution(&self, event: &ResolutionEvent) {
        self.total_resolutions.fetch_add(1, Ordering::Relaxed);

        if event.success {
            self.successful_resolutions.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_resolutions.fetch_add(1, Ordering::Relaxed);
        }

        if event.cached {
            self.cached_resolutions.fetch_add(1, Ordering::Relaxed);
        }

        self.total_duration_ms
            .fetch_add(event.duration_ms, Ordering::Relaxed);

        self.domain_counts
            .entry(event.domain.clone())
            .and_modify(|c| *c += 1)
            .or_insert(1);

        self.record_type_counts
            .entry(event.record_type)
            .and_modify(|c| *c += 1)
            .or_insert(1);
    }

    fn record_error(&self, _error: &str, _context: &str) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for ResolutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

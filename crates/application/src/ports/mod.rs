mod dns_cache_port;
mod dns_resolver;
mod metrics_sink;
mod name_resolution_provider;
mod progress;

pub use dns_cache_port::{CacheStats, DnsCachePort};
pub use dns_resolver::DnsResolver;
pub use metrics_sink::{MetricsSink, NoopMetricsSink, ResolutionEvent};
pub use name_resolution_provider::{
    AddressAnswer, LookupTarget, MxAnswer, NameAnswer, NameResolutionProvider, ProviderError,
    ProviderErrorKind, SoaAnswer, SrvAnswer, TxtAnswer,
};
pub use progress::ProgressObserver;

// Re-export for convenience
pub use ferrous_resolve_domain::{DnsQuery, DnsResponse};

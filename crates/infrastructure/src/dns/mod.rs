pub mod cache;
pub mod client;
pub mod events;
pub mod forwarding;
pub mod provider;
pub mod resolver;
pub mod transport;

pub use cache::{CacheMetrics, DnsCache, DnsCacheConfig};
pub use client::{DnsClient, DnsClientBuilder};
pub use events::{MetricsEvent, MetricsEventEmitter, MetricsSummary, ResolutionMetrics};
pub use provider::HickoryProvider;
pub use resolver::{CachedResolver, CoreResolver, ResolverBuilder, ResolverConfig};

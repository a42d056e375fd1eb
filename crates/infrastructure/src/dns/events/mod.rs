pub mod emitter;
pub mod metrics;
pub mod types;

pub use emitter::MetricsEventEmitter;
pub use metrics::{MetricsSummary, ResolutionMetrics};
pub use types::MetricsEvent;

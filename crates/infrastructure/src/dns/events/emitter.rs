use super::MetricsEvent;
use ferrous_resolve_application::ports::{MetricsSink, ResolutionEvent};
use tokio::sync::mpsc;

/// Fire-and-forget sink forwarding every signal over an unbounded channel.
///
/// Sending never blocks; events are dropped once the receiver is gone.
#[derive(Clone)]
pub struct MetricsEventEmitter {
    sender: Option<mpsc::UnboundedSender<MetricsEvent>>,
}

impl MetricsEventEmitter {
    pub fn new_disabled() -> Self {
        Self { sender: None }
    }

    pub fn new_enabled() -> (Self, mpsc::UnboundedReceiver<MetricsEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let emitter = Self { sender: Some(tx) };
        (emitter, rx)
    }

    pub fn emit(&self, event: MetricsEvent) {
        if let Some(ref tx) = self.sender {
            let _ = tx.send(event);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

impl MetricsSink for MetricsEventEmitter {
    fn record_cache_hit(&self, hit: bool, source: &str) {
        self.emit(MetricsEvent::CacheLookup {
            hit,
            source: source.to_string(),
        });
    }

    fn record_dns_resolution(&self, event: &ResolutionEvent) {
        self.emit(MetricsEvent::Resolution(event.clone()));
    }

    fn record_error(&self, error: &str, context: &str) {
        self.emit(MetricsEvent::Error {
            error: error.to_string(),
            context: context.to_string(),
        });
    }
}

impl Default for MetricsEventEmitter {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for MetricsEventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsEventEmitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

use ferrous_resolve_application::ports::ResolutionEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum MetricsEvent {
    CacheLookup { hit: bool, source: String },

    Resolution(ResolutionEvent),

    Error { error: String, context: String },
}

impl MetricsEvent {
    pub fn is_failure(&self) -> bool {
        match self {
            MetricsEvent::CacheLookup { .. } => false,
            MetricsEvent::Resolution(event) => !event.success,
            MetricsEvent::Error { .. } => true,
        }
    }
}

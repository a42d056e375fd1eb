use ferrous_resolve_application::ports::{ProviderError, ProviderErrorKind};
use ferrous_resolve_domain::ResolutionErrorKind;
use std::time::Duration;

/// Maps a provider error to the failure kind and message of a response.
pub fn classify(error: &ProviderError) -> (ResolutionErrorKind, String) {
    match error.kind {
        ProviderErrorKind::NotFound => (ResolutionErrorKind::NotFound, "domain not found".into()),
        ProviderErrorKind::NoData => (ResolutionErrorKind::NoData, "no records found".into()),
        ProviderErrorKind::ServerFailure => {
            (ResolutionErrorKind::ServerFailure, "server failure".into())
        }
        ProviderErrorKind::Timeout => (ResolutionErrorKind::Timeout, "query timeout".into()),
        ProviderErrorKind::Refused | ProviderErrorKind::Other => {
            (ResolutionErrorKind::Unknown, error.message.clone())
        }
    }
}

pub fn timeout_message(timeout: Duration) -> String {
    format!("query timeout after {}ms", timeout.as_millis())
}

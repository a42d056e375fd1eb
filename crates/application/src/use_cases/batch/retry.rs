use crate::ports::DnsResolver;
use ferrous_resolve_domain::{DnsQuery, DnsResponse, DomainError, ResolutionErrorKind};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::RetryPolicy;

/// Resolves `query`, retrying transient failures per `policy`.
///
/// An attempt fails when the resolver returns `Err`, when the attempt bound
/// elapses, or when the response carries a transient error kind. Definitive
/// answers (success, not found, no data) are returned at once.
pub async fn resolve_with_retry(
    resolver: &dyn DnsResolver,
    query: &DnsQuery,
    policy: &RetryPolicy,
) -> DnsResponse {
    let start = Instant::now();
    let max_attempts = policy.max_attempts.max(1);
    let mut last_response: Option<DnsResponse> = None;
    let mut last_failure = (ResolutionErrorKind::Unknown, String::new());

    for attempt in 1..=max_attempts {
        match timeout(policy.attempt_timeout, resolver.resolve(query)).await {
            Ok(Ok(response)) if !response.is_transient_failure() => return response,
            Ok(Ok(response)) => {
                last_failure = (
                    response.error_kind.unwrap_or(ResolutionErrorKind::Unknown),
                    response.error.clone().unwrap_or_default(),
                );
                last_response = Some(response);
            }
            Ok(Err(e)) => {
                last_failure = (error_kind_of(&e), e.to_string());
                last_response = None;
            }
            Err(_) => {
                last_failure = (
                    ResolutionErrorKind::Timeout,
                    format!(
                        "query timeout after {}ms",
                        policy.attempt_timeout.as_millis()
                    ),
                );
                last_response = None;
            }
        }

        if attempt < max_attempts {
            let backoff = policy.backoff_for(attempt);
            warn!(
                domain = %query.domain,
                record_type = %query.record_type,
                attempt,
                max_attempts,
                backoff_ms = backoff.as_millis() as u64,
                error = %last_failure.1,
                "Resolution attempt failed, retrying"
            );
            tokio::time::sleep(backoff).await;
        }
    }

    debug!(
        domain = %query.domain,
        record_type = %query.record_type,
        attempts = max_attempts,
        "Retries exhausted"
    );

    match last_response {
        Some(response) => response,
        None => DnsResponse::failure(
            query.clone(),
            last_failure.0,
            last_failure.1,
            start.elapsed().as_millis() as u64,
        ),
    }
}

/// Single attempt; resolver errors become error responses.
pub(super) async fn resolve_once(resolver: &dyn DnsResolver, query: &DnsQuery) -> DnsResponse {
    let start = Instant::now();
    match resolver.resolve(query).await {
        Ok(response) => response,
        Err(e) => DnsResponse::failure(
            query.clone(),
            error_kind_of(&e),
            e.to_string(),
            start.elapsed().as_millis() as u64,
        ),
    }
}

fn error_kind_of(error: &DomainError) -> ResolutionErrorKind {
    match error {
        DomainError::UnsupportedRecordType(_) | DomainError::InvalidRecordType(_) => {
            ResolutionErrorKind::Unsupported
        }
        _ => ResolutionErrorKind::Unknown,
    }
}

use crate::ports::DnsResolver;
use ferrous_resolve_domain::{DnsQuery, DnsResponse, ResolutionErrorKind};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::strategy::{BatchContext, BatchStrategy, BoundedStrategy, UnconstrainedStrategy};
use super::BatchOptions;

/// Resolves many queries concurrently.
///
/// The output has the same length and order as the input and never fails
/// for per-query problems. A worker fault in the bounded run hands the
/// remaining queries to the unconstrained strategy.
pub struct BatchResolveUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl BatchResolveUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(
        &self,
        queries: Vec<DnsQuery>,
        options: &BatchOptions,
    ) -> Vec<DnsResponse> {
        if queries.is_empty() {
            return Vec::new();
        }

        let start = Instant::now();
        let total = queries.len();
        let retry = options.retry_on_error.then_some(options.retry);
        let ctx = BatchContext::new(
            Arc::clone(&self.resolver),
            retry,
            options.progress.clone(),
            total,
        );
        let mut slots: Vec<Option<DnsResponse>> = vec![None; total];

        let primary = BoundedStrategy::new(options.concurrency);
        if let Err(e) = primary.run(&queries, &mut slots, &ctx).await {
            let fallback = UnconstrainedStrategy;
            warn!(
                error = %e,
                strategy = fallback.name(),
                completed = ctx.completed(),
                total,
                "Bounded batch failed, resolving remaining queries in isolation"
            );
            if let Err(e) = fallback.run(&queries, &mut slots, &ctx).await {
                error!(error = %e, "Fallback batch strategy failed");
            }
        }

        let responses: Vec<DnsResponse> = slots
            .into_iter()
            .zip(queries)
            .map(|(slot, query)| {
                slot.unwrap_or_else(|| {
                    DnsResponse::failure(
                        query,
                        ResolutionErrorKind::Unknown,
                        "batch worker failed",
                        0,
                    )
                })
            })
            .collect();

        let succeeded = responses.iter().filter(|r| r.is_success()).count();
        if total > 1 {
            info!(
                total,
                succeeded,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Batch resolution complete"
            );
        } else {
            debug!(total, succeeded, "Batch resolution complete");
        }

        responses
    }
}

use crate::ports::{DnsResolver, ProgressObserver};
use async_trait::async_trait;
use ferrous_resolve_domain::{DnsQuery, DnsResponse, ResolutionErrorKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error};

use super::retry::{resolve_once, resolve_with_retry};
use super::RetryPolicy;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("{failed} batch worker(s) faulted: {first}")]
    WorkerFault { failed: usize, first: String },
}

/// Shared state of one batch run.
pub struct BatchContext {
    resolver: Arc<dyn DnsResolver>,
    retry: Option<RetryPolicy>,
    progress: Option<Arc<dyn ProgressObserver>>,
    completed: AtomicUsize,
    total: usize,
}

impl BatchContext {
    pub fn new(
        resolver: Arc<dyn DnsResolver>,
        retry: Option<RetryPolicy>,
        progress: Option<Arc<dyn ProgressObserver>>,
        total: usize,
    ) -> Self {
        Self {
            resolver,
            retry,
            progress,
            completed: AtomicUsize::new(0),
            total,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Stores a finished response and reports progress for it.
    fn finish(&self, slots: &mut [Option<DnsResponse>], index: usize, response: DnsResponse) {
        if let Some(slot) = slots.get_mut(index) {
            if slot.is_none() {
                *slot = Some(response);
                let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(progress) = &self.progress {
                    progress.on_progress(completed, self.total);
                }
            }
        }
    }
}

async fn run_query(
    resolver: Arc<dyn DnsResolver>,
    query: DnsQuery,
    retry: Option<RetryPolicy>,
) -> DnsResponse {
    match retry {
        Some(policy) => resolve_with_retry(resolver.as_ref(), &query, &policy).await,
        None => resolve_once(resolver.as_ref(), &query).await,
    }
}

/// Strategy filling the empty slots of a batch.
///
/// `slots[i]` holds the response for `queries[i]`; a strategy only touches
/// slots that are still `None`, so a second strategy can pick up where a
/// failed one stopped.
#[async_trait]
pub trait BatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(
        &self,
        queries: &[DnsQuery],
        slots: &mut [Option<DnsResponse>],
        ctx: &BatchContext,
    ) -> Result<(), BatchError>;
}

/// Semaphore-bounded worker set; at most `concurrency` queries in flight.
pub struct BoundedStrategy {
    concurrency: usize,
}

impl BoundedStrategy {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }
}

#[async_trait]
impl BatchStrategy for BoundedStrategy {
    fn name(&self) -> &'static str {
        "bounded"
    }

    async fn run(
        &self,
        queries: &[DnsQuery],
        slots: &mut [Option<DnsResponse>],
        ctx: &BatchContext,
    ) -> Result<(), BatchError> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set: JoinSet<(usize, DnsResponse)> = JoinSet::new();

        for (index, query) in queries.iter().enumerate() {
            if slots.get(index).is_some_and(Option::is_some) {
                continue;
            }

            let semaphore = Arc::clone(&semaphore);
            let resolver = Arc::clone(&ctx.resolver);
            let query = query.clone();
            let retry = ctx.retry;

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                (index, run_query(resolver, query, retry).await)
            });
        }

        let mut faults: Vec<JoinError> = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, response)) => ctx.finish(slots, index, response),
                Err(e) => {
                    error!(error = %e, "Batch worker faulted");
                    faults.push(e);
                }
            }
        }

        match faults.first() {
            None => Ok(()),
            Some(first) => Err(BatchError::WorkerFault {
                failed: faults.len(),
                first: first.to_string(),
            }),
        }
    }
}

/// One task per pending query, no cap. Faults become error responses.
pub struct UnconstrainedStrategy;

#[async_trait]
impl BatchStrategy for UnconstrainedStrategy {
    fn name(&self) -> &'static str {
        "unconstrained"
    }

    async fn run(
        &self,
        queries: &[DnsQuery],
        slots: &mut [Option<DnsResponse>],
        ctx: &BatchContext,
    ) -> Result<(), BatchError> {
        let mut pending = Vec::new();
        for (index, query) in queries.iter().enumerate() {
            if slots.get(index).is_some_and(Option::is_some) {
                continue;
            }
            let handle = tokio::spawn(run_query(
                Arc::clone(&ctx.resolver),
                query.clone(),
                ctx.retry,
            ));
            pending.push((index, handle));
        }

        debug!(pending = pending.len(), "Running unconstrained batch");

        let (indices, handles): (Vec<usize>, Vec<_>) = pending.into_iter().unzip();
        let results = futures::future::join_all(handles).await;

        for (index, joined) in indices.into_iter().zip(results) {
            let response = match joined {
                Ok(response) => response,
                Err(e) => {
                    error!(
                        domain = %queries[index].domain,
                        error = %e,
                        "Isolated batch worker faulted"
                    );
                    DnsResponse::failure(
                        queries[index].clone(),
                        ResolutionErrorKind::Unknown,
                        format!("batch worker failed: {}", e),
                        0,
                    )
                }
            };
            ctx.finish(slots, index, response);
        }

        Ok(())
    }
}

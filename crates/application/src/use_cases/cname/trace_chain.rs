use crate::ports::{LookupTarget, NameResolutionProvider, ProviderErrorKind};
use ferrous_resolve_domain::{normalize_domain, CnameChainResult};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, warn};

const DEFAULT_MAX_DEPTH: usize = 10;
const DEFAULT_HOP_TIMEOUT: Duration = Duration::from_millis(5000);
const DEFAULT_TRACE_CONCURRENCY: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOptions {
    pub max_depth: usize,
    pub hop_timeout: Duration,
    pub follow_to_end: bool,
    /// Upstream override forwarded to every hop.
    pub server: Option<String>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            hop_timeout: DEFAULT_HOP_TIMEOUT,
            follow_to_end: true,
            server: None,
        }
    }
}

impl TraceOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_hop_timeout(mut self, hop_timeout: Duration) -> Self {
        self.hop_timeout = hop_timeout;
        self
    }

    pub fn with_follow_to_end(mut self, follow_to_end: bool) -> Self {
        self.follow_to_end = follow_to_end;
        self
    }

    pub fn with_server(mut self, server: Option<String>) -> Self {
        self.server = server;
        self
    }
}

/// Walks CNAME indirections hop by hop straight against the provider.
///
/// Each hop is independently fallible: a failed or slow hop ends the trace
/// with the chain gathered so far. The response cache is never consulted.
#[derive(Clone)]
pub struct CnameTracer {
    provider: Arc<dyn NameResolutionProvider>,
}

impl CnameTracer {
    pub fn new(provider: Arc<dyn NameResolutionProvider>) -> Self {
        Self { provider }
    }

    pub async fn trace(&self, domain: &str, options: &TraceOptions) -> CnameChainResult {
        let start = Instant::now();
        let max_depth = options.max_depth.max(1);

        let mut current = normalize_domain(domain);
        let mut visited: HashSet<String> = HashSet::new();
        let mut chain: Vec<String> = Vec::new();
        let mut final_target = None;
        let mut has_loop = false;
        let mut max_depth_reached = false;
        let mut error = None;

        loop {
            if chain.len() >= max_depth {
                max_depth_reached = true;
                break;
            }

            if !visited.insert(current.clone()) {
                has_loop = true;
                break;
            }
            chain.push(current.clone());

            let target = LookupTarget::new(&current).with_server(options.server.as_deref());
            let hop = timeout(options.hop_timeout, self.provider.resolve_cname(&target)).await;

            let next = match hop {
                Err(_) => {
                    let hop_timeout_ms = options.hop_timeout.as_millis() as u64;
                    warn!(domain = %current, hop_timeout_ms, "CNAME hop timed out");
                    error = Some(format!("hop timeout after {}ms", hop_timeout_ms));
                    break;
                }
                Ok(Err(e))
                    if matches!(e.kind, ProviderErrorKind::NotFound | ProviderErrorKind::NoData) =>
                {
                    final_target = Some(current.clone());
                    break;
                }
                Ok(Err(e)) => {
                    warn!(domain = %current, error = %e, "CNAME hop failed");
                    error = Some(e.to_string());
                    break;
                }
                Ok(Ok(answers)) => match answers.into_iter().next() {
                    Some(answer) => normalize_domain(&answer.name),
                    None => {
                        final_target = Some(current.clone());
                        break;
                    }
                },
            };

            if !options.follow_to_end {
                final_target = Some(next);
                break;
            }
            current = next;
        }

        let result = CnameChainResult {
            chain,
            final_target,
            has_loop,
            max_depth_reached,
            resolution_time_ms: start.elapsed().as_millis() as u64,
            error,
        };

        debug!(
            domain = %result.requested_domain(),
            hops = result.hops(),
            has_loop = result.has_loop,
            max_depth_reached = result.max_depth_reached,
            "CNAME trace complete"
        );

        result
    }

    /// Traces every domain with at most `concurrency` traces in flight.
    ///
    /// Output order matches `domains`; a worker that dies yields a chain
    /// holding only its domain.
    pub async fn trace_many(
        &self,
        domains: &[String],
        options: &TraceOptions,
        concurrency: usize,
    ) -> Vec<CnameChainResult> {
        let concurrency = if concurrency == 0 {
            DEFAULT_TRACE_CONCURRENCY
        } else {
            concurrency
        };
        let semaphore = Arc::new(Semaphore::new(concurrency));

        let handles: Vec<_> = domains
            .iter()
            .map(|domain| {
                let tracer = self.clone();
                let semaphore = Arc::clone(&semaphore);
                let domain = domain.clone();
                let options = options.clone();
                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok();
                    tracer.trace(&domain, &options).await
                })
            })
            .collect();

        let joined = futures::future::join_all(handles).await;

        domains
            .iter()
            .zip(joined)
            .map(|(domain, result)| match result {
                Ok(chain) => chain,
                Err(e) => {
                    warn!(domain = %domain, error = %e, "CNAME trace worker failed");
                    CnameChainResult::unresolved(
                        normalize_domain(domain),
                        Some(format!("trace worker failed: {}", e)),
                    )
                }
            })
            .collect()
    }
}

use super::print_json;
use anyhow::Context;
use clap::Args;
use ferrous_resolve_application::ports::CacheStats;
use ferrous_resolve_domain::{DnsQuery, DnsResponse, RecordType};
use ferrous_resolve_infrastructure::dns::DnsClient;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Args)]
pub struct BatchArgs {
    /// Domains to resolve
    domains: Vec<String>,

    /// Read more domains from a file, one per line (`#` starts a comment)
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<String>,

    /// Record type
    #[arg(short = 't', long = "type", default_value = "A")]
    record_type: RecordType,

    /// Do not retry transient failures
    #[arg(long)]
    no_retry: bool,
}

#[derive(Serialize)]
struct BatchReport {
    total: usize,
    succeeded: usize,
    failed: usize,
    cache: CacheStats,
    responses: Vec<DnsResponse>,
}

pub async fn run(client: &DnsClient, args: BatchArgs) -> anyhow::Result<bool> {
    let mut domains = args.domains;
    if let Some(path) = &args.file {
        domains.extend(read_domains(path)?);
    }
    anyhow::ensure!(!domains.is_empty(), "no domains given");

    let mut options = client
        .config()
        .batch_options()
        .with_progress(Arc::new(|completed: usize, total: usize| {
            debug!(completed, total, "Batch progress");
        }));
    if args.no_retry {
        options = options.with_retry_on_error(false);
    }

    info!(
        domains = domains.len(),
        record_type = %args.record_type,
        concurrency = options.concurrency,
        "Starting batch"
    );

    let queries = domains
        .iter()
        .map(|domain| DnsQuery::new(domain, args.record_type))
        .collect();
    let responses = client.batch_resolve_optimized(queries, &options).await;

    let succeeded = responses.iter().filter(|r| r.is_success()).count();
    let report = BatchReport {
        total: responses.len(),
        succeeded,
        failed: responses.len() - succeeded,
        cache: client.cache_stats(),
        responses,
    };

    print_json(&report)?;
    Ok(report.failed == 0)
}

fn read_domains(path: &str) -> anyhow::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read domain list {}", path))?;

    Ok(contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

use super::print_json;
use clap::Args;
use ferrous_resolve_application::use_cases::{health_score, validate};
use ferrous_resolve_domain::{ChainValidation, CnameChainResult};
use ferrous_resolve_infrastructure::dns::DnsClient;
use serde::Serialize;
use std::time::Duration;

#[derive(Args)]
pub struct TraceArgs {
    /// Domains whose alias chains to follow
    #[arg(required = true)]
    domains: Vec<String>,

    /// Maximum number of chain entries
    #[arg(long)]
    max_depth: Option<usize>,

    /// Per-hop timeout in milliseconds
    #[arg(long)]
    hop_timeout_ms: Option<u64>,

    /// Stop after the first alias
    #[arg(long)]
    first_hop_only: bool,

    /// Ask this server (ip[:port]) for every hop
    #[arg(long)]
    server: Option<String>,
}

#[derive(Serialize)]
struct TracedChain {
    #[serde(flatten)]
    result: CnameChainResult,
    validation: ChainValidation,
}

#[derive(Serialize)]
struct TraceReport {
    chains: Vec<TracedChain>,
    health_score: f64,
}

pub async fn run(client: &DnsClient, args: TraceArgs) -> anyhow::Result<bool> {
    let mut options = client.config().trace.clone().with_server(args.server);
    if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(max_depth);
    }
    if let Some(hop_timeout_ms) = args.hop_timeout_ms {
        options = options.with_hop_timeout(Duration::from_millis(hop_timeout_ms));
    }
    if args.first_hop_only {
        options = options.with_follow_to_end(false);
    }

    let results = client.trace_many(&args.domains, &options).await;
    let score = health_score(&results);

    let chains: Vec<TracedChain> = results
        .into_iter()
        .map(|result| TracedChain {
            validation: validate(&result),
            result,
        })
        .collect();
    let all_valid = chains.iter().all(|chain| chain.validation.is_valid);

    print_json(&TraceReport {
        chains,
        health_score: score,
    })?;
    Ok(all_valid)
}

use super::print_json;
use clap::Args;
use ferrous_resolve_domain::RecordType;
use ferrous_resolve_infrastructure::dns::DnsClient;

#[derive(Args)]
pub struct RecordsArgs {
    /// Domains to resolve
    #[arg(required = true)]
    domains: Vec<String>,

    /// Record types, comma separated; defaults to A,AAAA,CNAME,MX,TXT,NS
    #[arg(short = 't', long = "types", value_delimiter = ',')]
    record_types: Vec<RecordType>,
}

/// Succeeds when every domain answered at least one record type.
pub async fn run(client: &DnsClient, args: RecordsArgs) -> anyhow::Result<bool> {
    let grouped = client
        .resolve_all_records_for_domains(&args.domains, &args.record_types)
        .await;

    let all_answered = grouped
        .values()
        .all(|responses| responses.iter().any(|r| r.is_success()));

    print_json(&grouped)?;
    Ok(all_answered)
}

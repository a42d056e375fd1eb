use super::print_json;
use clap::Args;
use ferrous_resolve_domain::{DnsQuery, RecordType};
use ferrous_resolve_infrastructure::dns::DnsClient;

#[derive(Args)]
pub struct ResolveArgs {
    /// Domain to resolve
    domain: String,

    /// Record type
    #[arg(short = 't', long = "type", default_value = "A")]
    record_type: RecordType,

    /// Ask this server (ip[:port]) instead of the configured ones
    #[arg(long)]
    server: Option<String>,
}

pub async fn run(client: &DnsClient, args: ResolveArgs) -> anyhow::Result<bool> {
    let mut query = DnsQuery::new(&args.domain, args.record_type);
    if let Some(server) = args.server {
        query = query.with_server(server);
    }

    let response = client.resolve_query(&query).await?;
    print_json(&response)?;
    Ok(response.is_success())
}

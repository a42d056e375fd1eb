use clap::{Parser, Subcommand};
use ferrous_resolve_domain::CliOverrides;
use ferrous_resolve_infrastructure::dns::DnsClient;
use std::process::ExitCode;
use tracing::{error, info};

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "ferrous-resolve")]
#[command(version)]
#[command(about = "Ferrous Resolve - concurrent DNS lookups, batch resolution and CNAME tracing")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Upstream servers (ip or ip:port), comma separated
    #[arg(short = 's', long, value_delimiter = ',', global = true)]
    servers: Option<Vec<String>>,

    /// Per-query timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Batch concurrency cap
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Disable the response cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one domain for one record type
    Resolve(commands::resolve::ResolveArgs),

    /// Follow the CNAME chain of one or more domains
    Trace(commands::trace::TraceArgs),

    /// Resolve many domains for one record type
    Batch(commands::batch::BatchArgs),

    /// Resolve several record types for several domains
    Records(commands::records::RecordsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "ferrous-resolve failed");
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every lookup of the command succeeded.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let cli_overrides = CliOverrides {
        servers: cli.servers,
        timeout_ms: cli.timeout_ms,
        concurrency: cli.concurrency,
        no_cache: cli.no_cache,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous Resolve v{}", env!("CARGO_PKG_VERSION"));

    let client = DnsClient::from_config(&config)?;

    let outcome = match cli.command {
        Command::Resolve(args) => commands::resolve::run(&client, args).await,
        Command::Trace(args) => commands::trace::run(&client, args).await,
        Command::Batch(args) => commands::batch::run(&client, args).await,
        Command::Records(args) => commands::records::run(&client, args).await,
    };

    client.destroy();
    outcome
}

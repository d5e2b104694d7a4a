use clap::Parser;
use ferrous_doh_domain::CliOverrides;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-doh")]
#[command(version)]
#[command(about = "Ferrous DoH - forwards plain DNS queries to a DNS-over-HTTPS upstream")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Address the UDP and TCP listeners bind to (host:port)
    #[arg(short = 'd', long, value_name = "ADDR")]
    dns_address: Option<String>,

    /// Client host admitted on UDP (0.0.0.0 admits every client)
    #[arg(short = 'l', long, value_name = "HOST")]
    listen_address: Option<String>,

    /// IP address every upstream connection is pinned to
    #[arg(long, value_name = "IP")]
    upstream_ip: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_address: cli.dns_address,
        listen_address: cli.listen_address,
        upstream_ip: cli.upstream_ip,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    let log_sink = bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous DoH v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();

    let dns_services = di::DnsServices::new(&config)?;

    di::build_job_runner(&config, log_sink)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    server::run_dns_server(&config, dns_services.forward_query, shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}

use anyhow::Context;
use ferrous_doh_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_doh_domain::Config;
use ferrous_doh_infrastructure::dns::DnsServer;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Serves UDP and TCP until Ctrl+C, then cancels `shutdown` and waits for
/// both listeners to stop.
pub async fn run_dns_server(
    config: &Config,
    use_case: Arc<ForwardDnsQueryUseCase>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let bind_addr = config.dns_socket_addr()?;
    let server = DnsServer::bind(bind_addr, use_case)
        .with_context(|| format!("Failed to bind DNS listeners on {}", bind_addr))?;

    info!(
        bind_address = %bind_addr,
        listen_address = %config.server.listen_address,
        "DNS forwarder listening"
    );

    let mut server_task = tokio::spawn(server.run(shutdown.clone()));

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => info!("Received Ctrl+C, shutting down"),
                Err(e) => error!(error = %e, "Failed to listen for Ctrl+C, shutting down"),
            }
            shutdown.cancel();
            server_task.await.context("DNS server task panicked")??;
        }
        result = &mut server_task => {
            shutdown.cancel();
            result.context("DNS server task panicked")??;
        }
    }

    Ok(())
}

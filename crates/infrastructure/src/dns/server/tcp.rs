//! DNS over TCP listener (RFC 1035 §4.2.2)
//!
//! One query per connection: read one length-prefixed message, forward it,
//! write one length-prefixed response, close.

use crate::dns::transport::framing::{read_frame, write_frame};
use ferrous_doh_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_doh_domain::{DnsRequest, DomainError};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct TcpDnsListener {
    listener: TcpListener,
    use_case: Arc<ForwardDnsQueryUseCase>,
}

impl TcpDnsListener {
    pub fn new(listener: TcpListener, use_case: Arc<ForwardDnsQueryUseCase>) -> Self {
        Self { listener, use_case }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until `shutdown` fires, one task per connection.
    pub async fn run(self, shutdown: CancellationToken) -> io::Result<()> {
        info!(bind_address = %self.local_addr()?, "TCP DNS listener started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("TCP DNS listener: shutting down");
                    return Ok(());
                }
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            let use_case = Arc::clone(&self.use_case);
                            tokio::spawn(handle_connection(stream, peer, use_case));
                        }
                        Err(e) => {
                            warn!(error = %e, "Failed to accept TCP connection");
                        }
                    }
                }
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    use_case: Arc<ForwardDnsQueryUseCase>,
) {
    let message = match read_frame(&mut stream).await {
        Ok(message) => message,
        Err(e) => {
            warn!(client = %peer, error = %e, "Failed to read TCP DNS message");
            return;
        }
    };

    let request = DnsRequest::tcp(peer, message);
    match use_case.execute(&request).await {
        Ok(response) => {
            if let Err(e) = write_frame(&mut stream, &response).await {
                warn!(client = %peer, error = %e, "Failed to write TCP response");
                return;
            }
        }
        Err(DomainError::AdmissionRejected(_)) => {
            debug!(client = %peer, "TCP query dropped by admission rule");
        }
        Err(e) => {
            warn!(client = %peer, error = %e, "Failed to forward TCP query");
        }
    }

    if let Err(e) = stream.shutdown().await {
        debug!(client = %peer, error = %e, "TCP shutdown failed");
    }
}

//! DNS over UDP listener (RFC 1035 §4.2.1)
//!
//! One query per datagram, one response per datagram, no framing. Queries
//! longer than the receive buffer are truncated; EDNS(0) sizes are not honored.

use bytes::Bytes;
use ferrous_doh_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_doh_domain::{DnsRequest, DomainError};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const MAX_UDP_QUERY_SIZE: usize = 512;

pub struct UdpDnsListener {
    socket: Arc<UdpSocket>,
    use_case: Arc<ForwardDnsQueryUseCase>,
}

impl UdpDnsListener {
    pub fn new(socket: UdpSocket, use_case: Arc<ForwardDnsQueryUseCase>) -> Self {
        Self {
            socket: Arc::new(socket),
            use_case,
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receives datagrams until `shutdown` fires. Each datagram is handled on
    /// its own task, so the receive loop never waits on the upstream.
    pub async fn run(self, shutdown: CancellationToken) -> io::Result<()> {
        info!(bind_address = %self.local_addr()?, "UDP DNS listener started");

        let mut recv_buf = [0u8; MAX_UDP_QUERY_SIZE];
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("UDP DNS listener: shutting down");
                    return Ok(());
                }
                result = self.socket.recv_from(&mut recv_buf) => {
                    match result {
                        Ok((n, from)) => {
                            self.dispatch(Bytes::copy_from_slice(&recv_buf[..n]), from);
                        }
                        Err(e) => {
                            warn!(error = %e, "Failed to read from UDP socket");
                        }
                    }
                }
            }
        }
    }

    fn dispatch(&self, payload: Bytes, from: SocketAddr) {
        let socket = Arc::clone(&self.socket);
        let use_case = Arc::clone(&self.use_case);

        tokio::spawn(async move {
            let request = DnsRequest::udp(from, payload);
            match use_case.execute(&request).await {
                Ok(response) => {
                    if let Err(e) = socket.send_to(&response, from).await {
                        warn!(client = %from, error = %e, "Failed to write UDP response");
                    }
                }
                Err(DomainError::AdmissionRejected(_)) => {
                    debug!(client = %from, "UDP query dropped by admission rule");
                }
                Err(e) => {
                    warn!(client = %from, error = %e, "Failed to forward UDP query");
                }
            }
        });
    }
}

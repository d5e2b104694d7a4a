pub mod socket;
pub mod tcp;
pub mod udp;

pub use tcp::TcpDnsListener;
pub use udp::{UdpDnsListener, MAX_UDP_QUERY_SIZE};

use ferrous_doh_application::use_cases::ForwardDnsQueryUseCase;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// UDP and TCP listeners sharing one bind address and one forwarding use case.
pub struct DnsServer {
    udp: UdpDnsListener,
    tcp: TcpDnsListener,
}

impl DnsServer {
    /// Binds both sockets. Must be called from within a Tokio runtime.
    pub fn bind(addr: SocketAddr, use_case: Arc<ForwardDnsQueryUseCase>) -> io::Result<Self> {
        let udp = UdpDnsListener::new(socket::bind_udp(addr)?, Arc::clone(&use_case));
        let tcp = TcpDnsListener::new(socket::bind_tcp(addr)?, use_case);
        Ok(Self { udp, tcp })
    }

    pub fn udp_local_addr(&self) -> io::Result<SocketAddr> {
        self.udp.local_addr()
    }

    pub fn tcp_local_addr(&self) -> io::Result<SocketAddr> {
        self.tcp.local_addr()
    }

    pub async fn run(self, shutdown: CancellationToken) -> io::Result<()> {
        info!(
            udp = %self.udp_local_addr()?,
            tcp = %self.tcp_local_addr()?,
            "DNS server ready"
        );

        let (udp, tcp) = tokio::join!(self.udp.run(shutdown.clone()), self.tcp.run(shutdown));
        udp?;
        tcp?;
        Ok(())
    }
}

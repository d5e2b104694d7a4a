pub mod forwarding;
pub mod server;
pub mod transport;

pub use forwarding::InflightLimitForwarder;
pub use server::{DnsServer, TcpDnsListener, UdpDnsListener};
pub use transport::DohForwarder;

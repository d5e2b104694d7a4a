use bytes::Bytes;
use std::fmt;
use std::net::SocketAddr;

/// Listener transport a query arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Udp,
    Tcp,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "UDP",
            Self::Tcp => "TCP",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One in-flight query. The payload is an opaque DNS wire message.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub transport: TransportKind,
    pub client: SocketAddr,
    pub payload: Bytes,
}

impl DnsRequest {
    pub fn new(transport: TransportKind, client: SocketAddr, payload: impl Into<Bytes>) -> Self {
        Self {
            transport,
            client,
            payload: payload.into(),
        }
    }

    pub fn udp(client: SocketAddr, payload: impl Into<Bytes>) -> Self {
        Self::new(TransportKind::Udp, client, payload)
    }

    pub fn tcp(client: SocketAddr, payload: impl Into<Bytes>) -> Self {
        Self::new(TransportKind::Tcp, client, payload)
    }
}

/// Lowercase hex rendering of a byte slice, for trace logs.
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

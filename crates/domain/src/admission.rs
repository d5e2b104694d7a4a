use std::net::SocketAddr;

pub const ADMIT_ANY: &str = "0.0.0.0";

/// Source-host allow rule for inbound queries.
///
/// The configured listen address is compared literally against the textual
/// host of the client address. `0.0.0.0` admits every client. This is a coarse
/// filter, not a network ACL: there is no prefix or CIDR matching.
#[derive(Debug, Clone)]
pub struct ListenAdmission {
    listen_address: String,
}

impl ListenAdmission {
    pub fn new(listen_address: impl Into<String>) -> Self {
        Self {
            listen_address: listen_address.into(),
        }
    }

    pub fn listen_address(&self) -> &str {
        &self.listen_address
    }

    pub fn admits_any(&self) -> bool {
        self.listen_address == ADMIT_ANY
    }

    /// Host part of a client address. IPv4-mapped IPv6 sources seen on a
    /// dual-stack socket are reported in their IPv4 form.
    pub fn client_host(client: &SocketAddr) -> String {
        client.ip().to_canonical().to_string()
    }

    pub fn admits(&self, client: &SocketAddr) -> bool {
        self.admits_any() || Self::client_host(client) == self.listen_address
    }
}

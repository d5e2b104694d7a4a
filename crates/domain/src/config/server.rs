use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Source host admitted by the listeners. `0.0.0.0` admits every client.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// UDP and TCP bind address, `host:port`.
    #[serde(default = "default_dns_address")]
    pub dns_address: String,

    /// Upper bound on concurrently forwarded queries. Unbounded when absent.
    #[serde(default)]
    pub max_inflight_requests: Option<usize>,

    /// Apply the listen address admission rule to TCP connections as well.
    #[serde(default)]
    pub tcp_admission: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            dns_address: default_dns_address(),
            max_inflight_requests: None,
            tcp_admission: false,
        }
    }
}

fn default_listen_address() -> String {
    "127.0.0.1".to_string()
}

fn default_dns_address() -> String {
    "127.0.0.1:53".to_string()
}

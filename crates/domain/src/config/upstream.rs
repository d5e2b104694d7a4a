use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// Browser-like User-Agent sent to the DoH server. Some resolvers filter
/// requests by client signature, so the default mimics a desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36 DoH-Client/1.0.0";

pub const HTTPS_PORT: u16 = 443;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// DoH endpoint, e.g. `https://dns.google/dns-query`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Hostname presented for TLS and HTTP. Derived from `url` when absent.
    #[serde(default)]
    pub hostname: Option<String>,

    /// IP address dialed instead of resolving `hostname`.
    #[serde(default = "default_ip")]
    pub ip: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overall bound on one DoH exchange. No bound when absent.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            hostname: None,
            ip: default_ip(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    /// Address the forwarder connects to: `ip:443`, or `[ip]:443` for IPv6 literals.
    pub fn dial_target(&self) -> String {
        if self.ip.contains(':') {
            format!("[{}]:{}", self.ip, HTTPS_PORT)
        } else {
            format!("{}:{}", self.ip, HTTPS_PORT)
        }
    }

    pub fn pinned_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let target = self.dial_target();
        target.parse::<SocketAddr>().map_err(|_| {
            ConfigError::Validation(format!(
                "Pinned upstream IP '{}' is not a valid IP address",
                self.ip
            ))
        })
    }

    /// Host and optional port of `url`, host without brackets.
    fn url_authority(&self) -> Result<(String, Option<&str>), ConfigError> {
        let rest = self.url.strip_prefix("https://").ok_or_else(|| {
            ConfigError::Validation(format!("Upstream URL '{}' must use https://", self.url))
        })?;

        let authority = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        let authority = authority.rsplit('@').next().unwrap_or(authority);

        let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
            let (host, after) = bracketed.split_once(']').unwrap_or((bracketed, ""));
            (host, after.strip_prefix(':'))
        } else {
            match authority.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (authority, None),
            }
        };

        if host.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Upstream URL '{}' has no host",
                self.url
            )));
        }
        Ok((host.to_ascii_lowercase(), port))
    }

    /// Host part of `url`, without port or brackets.
    pub fn url_host(&self) -> Result<String, ConfigError> {
        self.url_authority().map(|(host, _)| host)
    }

    /// Explicit port in `url`, if any.
    pub fn url_port(&self) -> Result<Option<u16>, ConfigError> {
        match self.url_authority()?.1 {
            None | Some("") => Ok(None),
            Some(port) => port.parse::<u16>().map(Some).map_err(|_| {
                ConfigError::Validation(format!(
                    "Upstream URL '{}' has an invalid port '{}'",
                    self.url, port
                ))
            }),
        }
    }

    pub fn effective_hostname(&self) -> Result<String, ConfigError> {
        match self.hostname.as_deref().filter(|h| !h.is_empty()) {
            Some(hostname) => Ok(hostname.to_ascii_lowercase()),
            None => self.url_host(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url_host = self.url_host()?;
        let hostname = self.effective_hostname()?;
        if hostname != url_host {
            return Err(ConfigError::Validation(format!(
                "Upstream hostname '{}' does not match URL host '{}'",
                hostname, url_host
            )));
        }

        let pinned_ip = self.ip.parse::<IpAddr>().map_err(|_| {
            ConfigError::Validation(format!(
                "Pinned upstream IP '{}' is not a valid IP address",
                self.ip
            ))
        })?;

        // Connections always go to the pinned IP on 443.
        if let Ok(url_ip) = url_host.parse::<IpAddr>() {
            if url_ip != pinned_ip {
                return Err(ConfigError::Validation(format!(
                    "Upstream URL host {} differs from the pinned IP {}",
                    url_ip, pinned_ip
                )));
            }
        }

        if let Some(port) = self.url_port()? {
            if port != HTTPS_PORT {
                return Err(ConfigError::Validation(format!(
                    "Upstream URL port {} is not allowed; connections are pinned to port {}",
                    port, HTTPS_PORT
                )));
            }
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Upstream connect timeout cannot be 0".to_string(),
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "Upstream request timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_url() -> String {
    "https://dns.google/dns-query".to_string()
}

fn default_ip() -> String {
    "8.8.8.8".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

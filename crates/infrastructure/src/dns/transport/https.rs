//! DNS-over-HTTPS forwarding with a pinned upstream address (RFC 8484)
//!
//! Sends DNS queries as HTTP POST requests with `application/dns-message` content type.
//! The request body is the raw DNS wire format message, and the response body
//! is relayed back untouched, whatever the HTTP status.
//!
//! The TCP connection always goes to the configured IP on port 443. The
//! upstream hostname is never resolved, but it is still used for SNI,
//! certificate validation and the `Host` header.
//!
//! Wire format (HTTP):
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//! User-Agent: Mozilla/5.0 (...) DoH-Client/1.0.0
//!
//! <raw DNS message bytes>
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::DnsForwarder;
use ferrous_doh_domain::config::UpstreamConfig;
use ferrous_doh_domain::DomainError;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Builds an HTTPS client whose connections for `hostname` go to `pinned_addr`.
///
/// Idle connections are never kept, so every request dials a fresh TCP
/// connection.
///
/// The override only applies to URLs whose host is `hostname`, and the port
/// comes from the URL. `UpstreamConfig::validate` rejects URLs that would
/// dial anything other than the pinned address.
pub fn pinned_client(
    hostname: &str,
    pinned_addr: SocketAddr,
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
) -> Result<reqwest::Client, DomainError> {
    let mut builder = reqwest::Client::builder()
        .use_rustls_tls()
        .connect_timeout(connect_timeout)
        .pool_max_idle_per_host(0)
        .resolve(hostname, pinned_addr);

    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| DomainError::RequestBuild(format!("Failed to build HTTPS client: {}", e)))
}

/// DNS-over-HTTPS forwarder pinned to one upstream IP
pub struct DohForwarder {
    client: reqwest::Client,
    url: String,
    user_agent: String,
    server: String,
}

impl DohForwarder {
    pub fn new(config: &UpstreamConfig) -> Result<Self, DomainError> {
        config
            .validate()
            .map_err(|e| DomainError::RequestBuild(e.to_string()))?;

        let hostname = config
            .effective_hostname()
            .map_err(|e| DomainError::RequestBuild(e.to_string()))?;
        let pinned_addr = config
            .pinned_socket_addr()
            .map_err(|e| DomainError::RequestBuild(e.to_string()))?;

        let client = pinned_client(
            &hostname,
            pinned_addr,
            Duration::from_secs(config.connect_timeout_secs),
            config.request_timeout_secs.map(Duration::from_secs),
        )?;

        Ok(Self::with_client(
            client,
            config.url.clone(),
            config.user_agent.clone(),
            config.dial_target(),
        ))
    }

    /// Wraps an already configured client. `server` labels errors and logs.
    pub fn with_client(
        client: reqwest::Client,
        url: String,
        user_agent: String,
        server: String,
    ) -> Self {
        Self {
            client,
            url,
            user_agent,
            server,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn send_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_builder() {
            DomainError::RequestBuild(format!("Invalid DoH request to {}: {}", self.url, e))
        } else if e.is_connect() {
            DomainError::UpstreamConnect {
                server: self.server.clone(),
                reason: e.to_string(),
            }
        } else {
            DomainError::UpstreamRequest {
                server: self.server.clone(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl DnsForwarder for DohForwarder {
    async fn forward(&self, request: &[u8]) -> Result<Bytes, DomainError> {
        debug!(
            url = %self.url,
            server = %self.server,
            message_len = request.len(),
            "Sending DoH query"
        );

        // POST with application/dns-message (RFC 8484 §4.1)
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
            .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
            .header(USER_AGENT, self.user_agent.as_str())
            .body(request.to_vec())
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();

        let response_bytes = response.bytes().await.map_err(|e| DomainError::ResponseRead {
            server: self.server.clone(),
            reason: e.to_string(),
        })?;

        debug!(
            url = %self.url,
            status = status.as_u16(),
            response_len = response_bytes.len(),
            "DoH response received"
        );

        Ok(response_bytes)
    }
}

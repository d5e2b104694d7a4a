use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_domain::DomainError;

/// Port for relaying one raw DNS message to an upstream resolver.
///
/// Both request and response are opaque DNS wire messages. Implementations
/// never retry; a failure is reported once and the caller drops the query.
#[async_trait]
pub trait DnsForwarder: Send + Sync {
    async fn forward(&self, request: &[u8]) -> Result<Bytes, DomainError>;
}

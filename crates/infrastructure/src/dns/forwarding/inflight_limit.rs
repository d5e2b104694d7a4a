use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::DnsForwarder;
use ferrous_doh_domain::DomainError;
use tokio::sync::Semaphore;
use tracing::warn;

/// Forwarder that limits the number of in-flight queries, dropping queries if the limit is reached
pub struct InflightLimitForwarder<F> {
    semaphore: Semaphore,
    limit: usize,
    inner: F,
}

impl<F> InflightLimitForwarder<F> {
    pub fn new(forwarder: F, limit: usize) -> Self {
        Self {
            semaphore: Semaphore::new(limit),
            limit,
            inner: forwarder,
        }
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[async_trait]
impl<F: DnsForwarder> DnsForwarder for InflightLimitForwarder<F> {
    async fn forward(&self, request: &[u8]) -> Result<Bytes, DomainError> {
        match self.semaphore.try_acquire() {
            Ok(_permit) => self.inner.forward(request).await,
            Err(_) => {
                warn!(limit = self.limit, "Dropping query due to inflight limit");
                Err(DomainError::InflightLimitReached(self.limit))
            }
        }
    }
}

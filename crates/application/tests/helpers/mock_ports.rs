#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::{DnsForwarder, LogRotationPort};
use ferrous_doh_domain::DomainError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Forwarder that echoes the request, or returns a fixed response when set.
pub struct MockDnsForwarder {
    response: Arc<RwLock<Option<Bytes>>>,
    call_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockDnsForwarder {
    pub fn echo() -> Self {
        Self {
            response: Arc::new(RwLock::new(None)),
            call_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_response(&self, response: &'static [u8]) {
        *self.response.write().await = Some(Bytes::from_static(response));
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DnsForwarder for MockDnsForwarder {
    async fn forward(&self, request: &[u8]) -> Result<Bytes, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::UpstreamConnect {
                server: "127.0.0.1:443".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        match self.response.read().await.clone() {
            Some(response) => Ok(response),
            None => Ok(Bytes::copy_from_slice(request)),
        }
    }
}

pub struct MockLogRotator {
    size: AtomicU64,
    rotate_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockLogRotator {
    pub fn with_size(size: u64) -> Self {
        Self {
            size: AtomicU64::new(size),
            rotate_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub fn rotate_count(&self) -> u64 {
        self.rotate_count.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl LogRotationPort for MockLogRotator {
    async fn current_size(&self) -> Result<u64, DomainError> {
        Ok(self.size.load(Ordering::Relaxed))
    }

    async fn rotate(&self) -> Result<String, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::LogRotation("disk full".to_string()));
        }
        self.rotate_count.fetch_add(1, Ordering::Relaxed);
        self.size.store(0, Ordering::Relaxed);
        Ok("doh-client.log-20240101-000000.tar.gz".to_string())
    }
}

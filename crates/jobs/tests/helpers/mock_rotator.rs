#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_doh_application::ports::LogRotationPort;
use ferrous_doh_domain::DomainError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockLogRotator {
    size: AtomicU64,
    size_checks: Arc<AtomicU64>,
    rotate_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockLogRotator {
    pub fn with_size(size: u64) -> Self {
        Self {
            size: AtomicU64::new(size),
            size_checks: Arc::new(AtomicU64::new(0)),
            rotate_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub fn set_size(&self, size: u64) {
        self.size.store(size, Ordering::Relaxed);
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub fn size_checks(&self) -> u64 {
        self.size_checks.load(Ordering::Relaxed)
    }

    pub fn rotate_count(&self) -> u64 {
        self.rotate_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LogRotationPort for MockLogRotator {
    async fn current_size(&self) -> Result<u64, DomainError> {
        self.size_checks.fetch_add(1, Ordering::Relaxed);
        Ok(self.size.load(Ordering::Relaxed))
    }

    async fn rotate(&self) -> Result<String, DomainError> {
        self.rotate_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::LogRotation("archive write failed".to_string()));
        }
        self.size.store(0, Ordering::Relaxed);
        Ok("/tmp/doh.log-20240101-000000.tar.gz".to_string())
    }
}

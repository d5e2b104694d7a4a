use crate::ports::LogRotationPort;
use ferrous_doh_domain::DomainError;
use std::sync::Arc;
use tracing::{debug, info};

/// Use case: archive the live log once it grows past the size threshold.
pub struct RotateLogUseCase {
    rotator: Arc<dyn LogRotationPort>,
    max_size: u64,
}

impl RotateLogUseCase {
    pub fn new(rotator: Arc<dyn LogRotationPort>, max_size: u64) -> Self {
        Self { rotator, max_size }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Returns `true` when a rotation happened.
    pub async fn execute(&self) -> Result<bool, DomainError> {
        let size = self.rotator.current_size().await?;
        if size <= self.max_size {
            debug!(size, max_size = self.max_size, "Log below rotation threshold");
            return Ok(false);
        }

        let archive = self.rotator.rotate().await?;
        info!(size, archive = %archive, "Log file rotated");
        Ok(true)
    }
}

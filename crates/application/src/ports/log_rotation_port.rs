use async_trait::async_trait;
use ferrous_doh_domain::DomainError;

/// Port for archiving and truncating the live log file.
#[async_trait]
pub trait LogRotationPort: Send + Sync {
    /// Current size of the live log file in bytes.
    async fn current_size(&self) -> Result<u64, DomainError>;

    /// Archive the live log file and truncate it. Returns the archive path.
    async fn rotate(&self) -> Result<String, DomainError>;
}

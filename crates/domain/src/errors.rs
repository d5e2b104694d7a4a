use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Failed to build DoH request: {0}")]
    RequestBuild(String),

    #[error("Failed to connect to DoH server {server}: {reason}")]
    UpstreamConnect { server: String, reason: String },

    #[error("DoH request to {server} failed: {reason}")]
    UpstreamRequest { server: String, reason: String },

    #[error("Failed to read DoH response from {server}: {reason}")]
    ResponseRead { server: String, reason: String },

    #[error("Failed to read DNS message frame: {0}")]
    FrameRead(String),

    #[error("DNS message of {0} bytes exceeds the 65535 byte TCP frame limit")]
    FrameTooLarge(usize),

    #[error("Rejected DNS request from {0}")]
    AdmissionRejected(String),

    #[error("Dropping query: {0} requests already in flight")]
    InflightLimitReached(usize),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Log rotation failed: {0}")]
    LogRotation(String),
}

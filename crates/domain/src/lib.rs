//! Ferrous DoH Domain Layer
pub mod admission;
pub mod config;
pub mod dns_request;
pub mod errors;

pub use admission::ListenAdmission;
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_request::{DnsRequest, HexBytes, TransportKind};
pub use errors::DomainError;

pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod upstream;

pub use errors::ConfigError;
pub use logging::{LoggingConfig, MAX_ROTATION_INTERVAL_SECS};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::{UpstreamConfig, DEFAULT_USER_AGENT};

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;
use super::logging::{LoggingConfig, MAX_ROTATION_INTERVAL_SECS};
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-doh.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-doh/config.toml";

/// Main configuration structure for Ferrous DoH
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, admission)
    #[serde(default)]
    pub server: ServerConfig,

    /// DoH upstream configuration (URL, pinned IP, client identity)
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration (level, file, rotation)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-doh.toml in current directory
    /// 3. /etc/ferrous-doh/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(addr) = overrides.dns_address {
            self.server.dns_address = addr;
        }
        if let Some(addr) = overrides.listen_address {
            self.server.listen_address = addr;
        }
        if let Some(ip) = overrides.upstream_ip {
            self.upstream.ip = ip;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn dns_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.dns_address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "DNS address '{}' is not a valid socket address",
                self.server.dns_address
            ))
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dns_addr = self.dns_socket_addr()?;
        if dns_addr.port() == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.listen_address.is_empty() {
            return Err(ConfigError::Validation(
                "Listen address cannot be empty".to_string(),
            ));
        }

        if self.server.max_inflight_requests == Some(0) {
            return Err(ConfigError::Validation(
                "max_inflight_requests must be greater than 0".to_string(),
            ));
        }

        self.upstream.validate()?;

        if self.logging.max_size == 0 {
            return Err(ConfigError::Validation(
                "Log max_size must be greater than 0".to_string(),
            ));
        }
        if self.logging.rotation_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Log rotation interval cannot be 0".to_string(),
            ));
        }
        if self.logging.rotation_interval_secs > MAX_ROTATION_INTERVAL_SECS {
            return Err(ConfigError::Validation(format!(
                "Log rotation interval cannot exceed {} seconds",
                MAX_ROTATION_INTERVAL_SECS
            )));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_address: Option<String>,
    pub listen_address: Option<String>,
    pub upstream_ip: Option<String>,
    pub log_level: Option<String>,
}

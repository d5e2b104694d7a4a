use serde::{Deserialize, Serialize};

/// One year.
pub const MAX_ROTATION_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file. An empty path sends events to stderr and disables rotation.
    #[serde(default = "default_log_path")]
    pub path: Option<String>,

    /// Rotation threshold in bytes.
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    #[serde(default = "default_rotation_interval_secs")]
    pub rotation_interval_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            path: default_log_path(),
            max_size: default_max_size(),
            rotation_interval_secs: default_rotation_interval_secs(),
        }
    }
}

impl LoggingConfig {
    pub fn file_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> Option<String> {
    Some("doh-client.log".to_string())
}

fn default_max_size() -> u64 {
    10 * 1024 * 1024
}

fn default_rotation_interval_secs() -> u64 {
    600
}

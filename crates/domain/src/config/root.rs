use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::request_logging::RequestLoggingConfig;
use super::retention::RetentionConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "jenkin.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/jenkin/config.toml";

/// Main configuration structure for Jenkin
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Web server configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Log store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log retention job configuration
    #[serde(default)]
    pub retention: RetentionConfig,

    /// HTTP request/response logging configuration
    #[serde(default)]
    pub request_logging: RequestLoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. jenkin.toml in current directory
    /// 3. /etc/jenkin/config.toml
    /// 4. Default configuration
    ///
    /// CLI overrides are applied on top and the result is validated.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
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
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(url) = overrides.database_url {
            self.database.url = url;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(days) = overrides.retention_days {
            self.retention.retention_days = days;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.web_port == 0 {
            return Err(ConfigError::Validation("Web port cannot be 0".to_string()));
        }

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Database url cannot be empty".to_string(),
            ));
        }

        if self.retention.batch_size == 0 {
            return Err(ConfigError::Validation(
                "Retention batch_size must be greater than 0".to_string(),
            ));
        }

        if self.retention.enabled && self.retention.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Retention interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.request_logging.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "Request logging max_body_bytes must be greater than 0".to_string(),
            ));
        }

        if self.request_logging.max_buffer_bytes < self.request_logging.max_body_bytes {
            return Err(ConfigError::Validation(
                "Request logging max_buffer_bytes cannot be smaller than max_body_bytes"
                    .to_string(),
            ));
        }

        if !self.request_logging.path_prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "Request logging path_prefix '{}' must start with '/'",
                self.request_logging.path_prefix
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_url: Option<String>,
    pub log_level: Option<String>,
    pub retention_days: Option<u32>,
}

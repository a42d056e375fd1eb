use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverSettings;
use super::tracer::TracerConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-resolve.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-resolve/config.toml";

/// Main configuration structure for Ferrous Resolve
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Upstream servers, timeouts and batch behaviour
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Response cache sizing and expiry
    #[serde(default)]
    pub cache: CacheConfig,

    /// CNAME chain tracing limits
    #[serde(default)]
    pub tracer: TracerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-resolve.toml in current directory
    /// 3. /etc/ferrous-resolve/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(servers) = overrides.servers {
            if !servers.is_empty() {
                self.resolver.servers = servers;
            }
        }
        if let Some(timeout) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.resolver.concurrency = concurrency;
        }
        if overrides.no_cache {
            self.resolver.enable_cache = false;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No resolver servers configured".to_string(),
            ));
        }

        for server in &self.resolver.servers {
            if server.parse::<SocketAddr>().is_err() && server.parse::<IpAddr>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "Server '{}' is not an ip or ip:port address",
                    server
                )));
            }
        }

        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Resolver timeout cannot be 0".to_string(),
            ));
        }

        if self.resolver.attempt_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream attempt timeout cannot be 0".to_string(),
            ));
        }

        if self.tracer.hop_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Tracer hop timeout cannot be 0".to_string(),
            ));
        }

        if self.resolver.concurrency == 0 || self.tracer.concurrency == 0 {
            return Err(ConfigError::Validation(
                "Concurrency must be at least 1".to_string(),
            ));
        }

        if self.resolver.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        if self.tracer.max_depth == 0 {
            return Err(ConfigError::Validation(
                "Tracer max_depth must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub servers: Option<Vec<String>>,
    pub timeout_ms: Option<u64>,
    pub concurrency: Option<usize>,
    pub no_cache: bool,
    pub log_level: Option<String>,
}

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::local_answer::LocalAnswerConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use crate::dns_message::HEADER_LEN;
use crate::UpstreamAddr;

const LOCAL_CONFIG_PATH: &str = "relay53.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/relay53/config.toml";

/// Main configuration structure for relay53
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Listening socket
    pub server: ServerConfig,

    /// Resolver that queries are forwarded to
    pub upstream: UpstreamConfig,

    /// Answer served when no resolver is configured
    pub local_answer: LocalAnswerConfig,

    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. relay53.toml in current directory
    /// 3. /etc/relay53/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(resolver) = overrides.resolver {
            self.upstream.resolver = Some(resolver);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.sequential {
            self.server.concurrent = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Listen port cannot be 0".to_string()));
        }

        if self.server.max_datagram_size < HEADER_LEN {
            return Err(ConfigError::Validation(format!(
                "max_datagram_size must be at least {} bytes",
                HEADER_LEN
            )));
        }

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        if let Some(resolver) = &self.upstream.resolver {
            resolver
                .parse::<UpstreamAddr>()
                .map_err(ConfigError::Validation)?;
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub resolver: Option<String>,
    pub log_level: Option<String>,
    pub sequential: bool,
}

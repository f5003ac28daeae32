//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the daemon's
//! YAML configuration file and resolving it against command-line
//! overrides and built-in defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ConfigSource, DEFAULT_BROKER, DEFAULT_CLIENT_ID, DEFAULT_INPUT_TOPIC, DEFAULT_KEEP_ALIVE_SECS,
    DEFAULT_OUTPUT_TOPIC, DEFAULT_PORT, DEFAULT_QOS, DEFAULT_RECONNECT_DELAY_SECS, ServiceConfig,
};

/// Smallest keep-alive interval accepted, in seconds.
pub const MIN_KEEP_ALIVE_SECS: u64 = 5;

/// Smallest pause between reconnect attempts, in seconds.
pub const MIN_RECONNECT_DELAY_SECS: u64 = 1;

/// Loads and resolves the daemon configuration.
///
/// Precedence is command line, then YAML file, then built-in defaults.
///
/// # File Format
///
/// ```text
/// broker: 192.168.2.71
/// port: 1883
/// client_id: aqi-calculator
/// input_topic: airgradient/readings/d83bda1d7660
/// output_topic: aqi
/// qos: 1
/// keep_alive_secs: 60
/// reconnect_delay_secs: 5
/// ```
///
/// # Example
///
/// ```
/// use aqi_calculator::config::{ConfigLoader, ConfigSource};
///
/// let overrides = ConfigSource {
///     broker: Some("mqtt.local".to_string()),
///     ..ConfigSource::default()
/// };
/// let config = ConfigLoader::defaults().resolve(overrides).unwrap();
/// assert_eq!(config.broker, "mqtt.local");
/// assert_eq!(config.port, 1883);
/// assert_eq!(config.output_topic, "aqi");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    file: ConfigSource,
}

impl ConfigLoader {
    /// Creates a loader with no configuration file.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file does not exist or cannot be read (`ConfigNotFound`)
    /// - The file is not valid YAML or contains unknown keys (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        // An empty file deserializes to null, which means "nothing set".
        if content.trim().is_empty() {
            return Ok(Self::defaults());
        }

        let file = serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })?;

        Ok(Self { file })
    }

    /// Returns the values read from the configuration file.
    pub fn file(&self) -> &ConfigSource {
        &self.file
    }

    /// Resolves the final configuration, with `overrides` taking precedence
    /// over the file and the file over the built-in defaults.
    pub fn resolve(&self, overrides: ConfigSource) -> EngineResult<ServiceConfig> {
        let merged = overrides.or(self.file.clone());

        let config = ServiceConfig {
            broker: merged.broker.unwrap_or_else(|| DEFAULT_BROKER.to_string()),
            port: merged.port.unwrap_or(DEFAULT_PORT),
            client_id: merged
                .client_id
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            input_topic: merged
                .input_topic
                .unwrap_or_else(|| DEFAULT_INPUT_TOPIC.to_string()),
            output_topic: merged
                .output_topic
                .unwrap_or_else(|| DEFAULT_OUTPUT_TOPIC.to_string()),
            qos: merged.qos.unwrap_or(DEFAULT_QOS),
            keep_alive: Duration::from_secs(
                merged.keep_alive_secs.unwrap_or(DEFAULT_KEEP_ALIVE_SECS),
            ),
            reconnect_delay: Duration::from_secs(
                merged
                    .reconnect_delay_secs
                    .unwrap_or(DEFAULT_RECONNECT_DELAY_SECS),
            ),
        };

        validate(&config)?;
        Ok(config)
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate(config: &ServiceConfig) -> EngineResult<()> {
    if config.broker.trim().is_empty() {
        return Err(invalid("broker", "must not be empty"));
    }
    if config.port == 0 {
        return Err(invalid("port", "must be between 1 and 65535"));
    }
    if config.client_id.trim().is_empty() {
        return Err(invalid("client_id", "must not be empty"));
    }
    if config.input_topic.is_empty() {
        return Err(invalid("input_topic", "must not be empty"));
    }
    if config.output_topic.is_empty() {
        return Err(invalid("output_topic", "must not be empty"));
    }
    if config.output_topic.contains(['+', '#']) {
        return Err(invalid(
            "output_topic",
            "wildcards are only allowed in topic filters",
        ));
    }
    if rumqttc::matches(&config.output_topic, &config.input_topic) {
        return Err(invalid(
            "output_topic",
            format!(
                "'{}' matches input_topic '{}' and would be consumed again",
                config.output_topic, config.input_topic
            ),
        ));
    }
    if config.qos > 2 {
        return Err(invalid("qos", "must be 0, 1 or 2"));
    }
    if config.reconnect_delay.as_secs() < MIN_RECONNECT_DELAY_SECS {
        return Err(invalid(
            "reconnect_delay_secs",
            format!("must be at least {}", MIN_RECONNECT_DELAY_SECS),
        ));
    }
    if config.keep_alive.as_secs() < MIN_KEEP_ALIVE_SECS {
        return Err(invalid(
            "keep_alive_secs",
            format!("must be at least {}", MIN_KEEP_ALIVE_SECS),
        ));
    }

    Ok(())
}

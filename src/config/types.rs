//! Configuration types for the AQI daemon.
//!
//! [`ConfigSource`] is the partially specified form shared by the YAML
//! file and the command line; [`ServiceConfig`] is the fully resolved
//! configuration the MQTT bridge runs with.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default broker host.
pub const DEFAULT_BROKER: &str = "localhost";
/// Default broker port.
pub const DEFAULT_PORT: u16 = 1883;
/// Default MQTT client identifier.
pub const DEFAULT_CLIENT_ID: &str = "aqi-calculator";
/// Default topic filter readings are consumed from.
pub const DEFAULT_INPUT_TOPIC: &str = "airgradient/readings/+";
/// Default topic enriched readings are published to.
pub const DEFAULT_OUTPUT_TOPIC: &str = "aqi";
/// Default QoS for both subscription and publishing.
pub const DEFAULT_QOS: u8 = 1;
/// Default MQTT keep-alive interval in seconds.
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 60;
/// Default pause before polling again after a connection error.
pub const DEFAULT_RECONNECT_DELAY_SECS: u64 = 5;

/// A partial configuration as read from a YAML file or the command line.
///
/// Every field is optional; unset fields fall back to the next source.
///
/// # Example
///
/// ```
/// use aqi_calculator::config::ConfigSource;
///
/// let source: ConfigSource = serde_yaml::from_str("broker: mqtt.local\nport: 8883\n").unwrap();
/// assert_eq!(source.broker.as_deref(), Some("mqtt.local"));
/// assert_eq!(source.port, Some(8883));
/// assert_eq!(source.qos, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSource {
    /// Broker host name or address.
    #[serde(default)]
    pub broker: Option<String>,
    /// Broker TCP port.
    #[serde(default)]
    pub port: Option<u16>,
    /// MQTT client identifier.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Topic filter to subscribe to.
    #[serde(default)]
    pub input_topic: Option<String>,
    /// Topic to publish enriched readings to.
    #[serde(default)]
    pub output_topic: Option<String>,
    /// QoS level, 0, 1 or 2.
    #[serde(default)]
    pub qos: Option<u8>,
    /// Keep-alive interval in seconds.
    #[serde(default)]
    pub keep_alive_secs: Option<u64>,
    /// Delay in seconds before retrying after a connection error.
    #[serde(default)]
    pub reconnect_delay_secs: Option<u64>,
}

impl ConfigSource {
    /// Layers `self` over `fallback`: fields set here win.
    pub fn or(self, fallback: ConfigSource) -> ConfigSource {
        ConfigSource {
            broker: self.broker.or(fallback.broker),
            port: self.port.or(fallback.port),
            client_id: self.client_id.or(fallback.client_id),
            input_topic: self.input_topic.or(fallback.input_topic),
            output_topic: self.output_topic.or(fallback.output_topic),
            qos: self.qos.or(fallback.qos),
            keep_alive_secs: self.keep_alive_secs.or(fallback.keep_alive_secs),
            reconnect_delay_secs: self.reconnect_delay_secs.or(fallback.reconnect_delay_secs),
        }
    }
}

/// The resolved configuration of the MQTT bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Broker host name or address.
    pub broker: String,
    /// Broker TCP port.
    pub port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic filter to subscribe to.
    pub input_topic: String,
    /// Topic to publish enriched readings to.
    pub output_topic: String,
    /// QoS level, 0, 1 or 2.
    pub qos: u8,
    /// Keep-alive interval.
    pub keep_alive: Duration,
    /// Delay before retrying after a connection error.
    pub reconnect_delay: Duration,
}

impl ServiceConfig {
    /// Returns the broker address as `host:port`.
    pub fn broker_address(&self) -> String {
        format!("{}:{}", self.broker, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            broker: DEFAULT_BROKER.to_string(),
            port: DEFAULT_PORT,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            input_topic: DEFAULT_INPUT_TOPIC.to_string(),
            output_topic: DEFAULT_OUTPUT_TOPIC.to_string(),
            qos: DEFAULT_QOS,
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
            reconnect_delay: Duration::from_secs(DEFAULT_RECONNECT_DELAY_SECS),
        }
    }
}

//! Configuration loading and management for the AQI daemon.
//!
//! This module provides functionality to load the broker and topic
//! settings from a YAML file and merge them with command-line overrides.
//!
//! # Example
//!
//! ```no_run
//! use aqi_calculator::config::{ConfigLoader, ConfigSource};
//!
//! let loader = ConfigLoader::load("./aqi-calculator.yaml").unwrap();
//! let config = loader.resolve(ConfigSource::default()).unwrap();
//! println!("Broker: {}", config.broker_address());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, MIN_KEEP_ALIVE_SECS, MIN_RECONNECT_DELAY_SECS};
pub use types::{
    ConfigSource, DEFAULT_BROKER, DEFAULT_CLIENT_ID, DEFAULT_INPUT_TOPIC, DEFAULT_KEEP_ALIVE_SECS,
    DEFAULT_OUTPUT_TOPIC, DEFAULT_PORT, DEFAULT_QOS, DEFAULT_RECONNECT_DELAY_SECS, ServiceConfig,
};

//! MQTT service module for the AQI calculator.
//!
//! This module wires the pure calculation core to the broker: it parses
//! incoming readings, enriches them with their AQI and republishes them.

mod handler;
mod mqtt;

pub use handler::{ProcessedReading, enrich_reading, handle_message, parse_reading, process_payload};
pub use mqtt::{
    REQUEST_CHANNEL_CAPACITY, SHUTDOWN_GRACE, check_suback, mqtt_options, qos_level, run, run_until,
    shutdown_signal,
};

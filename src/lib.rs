//! Air Quality Index calculator for particulate-matter sensor telemetry.
//!
//! This crate derives the EPA AQI from PM2.5 and PM10 standard
//! concentrations and provides an MQTT daemon that enriches sensor
//! readings with it.
//!
//! ```
//! use aqi_calculator::calculation::compute_aqi;
//!
//! assert_eq!(compute_aqi(35.7, 45.0).unwrap(), 101);
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

//! Core data models for the AQI calculator.
//!
//! This module contains all the domain models used throughout the crate.

mod breakpoint;
mod calculation_result;
mod category;
mod pollutant;
mod reading;

pub use breakpoint::Breakpoint;
pub use calculation_result::{AqiBreakdown, AuditStep, SubIndexResult};
pub use category::AqiCategory;
pub use pollutant::{Concentration, Pollutant};
pub use reading::{AQI_FIELD, AqiReading, SensorReading};

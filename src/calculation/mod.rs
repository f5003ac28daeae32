//! Calculation logic for the AQI calculator.
//!
//! This module contains the pure AQI core: the EPA breakpoint tables,
//! concentration truncation, per-pollutant breakpoint lookup with linear
//! interpolation, and aggregation of the PM2.5 and PM10 sub-indices into
//! the reported AQI. Nothing here performs I/O or holds mutable state, so
//! every function is safe to call concurrently.

mod aggregate;
mod breakpoints;
mod sub_index;
mod truncation;

pub use aggregate::{calculate_aqi, compute_aqi};
pub use breakpoints::{
    AQI_CEILING, PM10_BREAKPOINTS, PM25_BREAKPOINTS, breakpoints_for, validate_breakpoints,
};
pub use sub_index::calculate_sub_index;
pub use truncation::{MAX_EXACT_CONCENTRATION, concentration_to_decimal, truncate_concentration};

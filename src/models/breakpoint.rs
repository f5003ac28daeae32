//! Breakpoint tier model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of a pollutant's AQI breakpoint table.
///
/// Both the concentration bounds and the AQI bounds are inclusive.
///
/// # Example
///
/// ```
/// use aqi_calculator::models::Breakpoint;
/// use rust_decimal::Decimal;
///
/// let good = Breakpoint::new(Decimal::new(0, 1), Decimal::new(120, 1), 0, 50);
/// assert!(good.contains(Decimal::new(120, 1)));
/// assert!(!good.contains(Decimal::new(121, 1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Lowest concentration of the tier, µg/m³.
    pub conc_low: Decimal,
    /// Highest concentration of the tier, µg/m³.
    pub conc_high: Decimal,
    /// AQI assigned to `conc_low`.
    pub aqi_low: u16,
    /// AQI assigned to `conc_high`.
    pub aqi_high: u16,
}

impl Breakpoint {
    /// Creates a breakpoint tier.
    pub const fn new(conc_low: Decimal, conc_high: Decimal, aqi_low: u16, aqi_high: u16) -> Self {
        Self {
            conc_low,
            conc_high,
            aqi_low,
            aqi_high,
        }
    }

    /// Returns true if `concentration` lies within the tier's inclusive bounds.
    pub fn contains(&self, concentration: Decimal) -> bool {
        concentration >= self.conc_low && concentration <= self.conc_high
    }
}

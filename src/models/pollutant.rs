//! Pollutant and concentration types.
//!
//! This module defines the [`Pollutant`] enum and the validated
//! [`Concentration`] value that the calculation core consumes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A particulate-matter pollutant with an EPA breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pollutant {
    /// Fine particulate matter, aerodynamic diameter ≤ 2.5 µm.
    Pm25,
    /// Coarse particulate matter, aerodynamic diameter ≤ 10 µm.
    Pm10,
}

impl Pollutant {
    /// Returns the identifier used in audit steps (e.g. `"pm25"`).
    pub fn id(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pollutant::Pm25 => f.write_str("PM2.5"),
            Pollutant::Pm10 => f.write_str("PM10"),
        }
    }
}

/// A raw, validated pollutant concentration in µg/m³.
///
/// Construction rejects negative, NaN and infinite values, so every
/// `Concentration` that reaches the calculation core is a finite
/// non-negative number.
///
/// # Examples
///
/// ```
/// use aqi_calculator::models::{Concentration, Pollutant};
///
/// let c = Concentration::new(Pollutant::Pm25, 35.49).unwrap();
/// assert_eq!(c.value(), 35.49);
///
/// assert!(Concentration::new(Pollutant::Pm25, -0.1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Concentration {
    pollutant: Pollutant,
    value: f64,
}

impl Concentration {
    /// Validates a raw concentration for the given pollutant.
    pub fn new(pollutant: Pollutant, value: f64) -> EngineResult<Self> {
        if value.is_nan() {
            return Err(EngineError::InvalidConcentration {
                pollutant,
                value,
                message: "value is not a number".to_string(),
            });
        }
        if value.is_infinite() {
            return Err(EngineError::InvalidConcentration {
                pollutant,
                value,
                message: "value is not finite".to_string(),
            });
        }
        if value < 0.0 {
            return Err(EngineError::InvalidConcentration {
                pollutant,
                value,
                message: "must not be negative".to_string(),
            });
        }

        // Normalise -0.0 so it displays and serializes as 0.
        let value = if value == 0.0 { 0.0 } else { value };

        Ok(Self { pollutant, value })
    }

    /// Returns the pollutant this concentration was measured for.
    pub fn pollutant(&self) -> Pollutant {
        self.pollutant
    }

    /// Returns the raw (untruncated) value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

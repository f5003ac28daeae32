//! AQI health categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The EPA health category an AQI value falls into.
///
/// # Example
///
/// ```
/// use aqi_calculator::models::AqiCategory;
///
/// assert_eq!(AqiCategory::from_aqi(33), AqiCategory::Good);
/// assert_eq!(AqiCategory::from_aqi(101), AqiCategory::UnhealthyForSensitiveGroups);
/// assert_eq!(AqiCategory::from_aqi(500), AqiCategory::Hazardous);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    /// 0-50.
    Good,
    /// 51-100.
    Moderate,
    /// 101-150.
    UnhealthyForSensitiveGroups,
    /// 151-200.
    Unhealthy,
    /// 201-300.
    VeryUnhealthy,
    /// 301-500.
    Hazardous,
}

impl AqiCategory {
    /// Maps an AQI value to its category. Values above 500 are Hazardous.
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    /// Returns the category's public-facing label.
    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

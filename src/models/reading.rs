//! Sensor reading models.
//!
//! Readings arrive as JSON objects published by the particulate-matter
//! monitor. Only the two standard concentrations are read; every other
//! field (counts, temperature, humidity, CO2, TVOC, NOx, serial number,
//! firmware...) is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the field the AQI is attached under.
pub const AQI_FIELD: &str = "aqi";

/// An incoming sensor reading.
///
/// # Example
///
/// ```
/// use aqi_calculator::models::SensorReading;
///
/// let reading: SensorReading = serde_json::from_str(
///     r#"{"pm02Standard": 35.7, "pm10Standard": 45, "serialno": "d83bda1d7660"}"#,
/// ).unwrap();
/// assert_eq!(reading.pm02_standard, 35.7);
/// assert_eq!(reading.pm10_standard, 45.0);
/// assert_eq!(reading.extra["serialno"], "d83bda1d7660");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// PM2.5 standard concentration, µg/m³.
    #[serde(rename = "pm02Standard")]
    pub pm02_standard: f64,
    /// PM10 standard concentration, µg/m³.
    #[serde(rename = "pm10Standard")]
    pub pm10_standard: f64,
    /// All other fields of the reading, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A sensor reading enriched with its AQI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiReading {
    /// The original reading.
    #[serde(flatten)]
    pub reading: SensorReading,
    /// The overall AQI.
    pub aqi: u16,
}

impl AqiReading {
    /// Attaches `aqi` to a reading, replacing any `aqi` it already carried.
    pub fn new(mut reading: SensorReading, aqi: u16) -> Self {
        reading.extra.remove(AQI_FIELD);
        Self { reading, aqi }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_reading_json() -> &'static str {
        r#"{
            "pm01": 2, "pm02": 4, "pm10": 4,
            "pm01Standard": 2, "pm02Standard": 35.7, "pm10Standard": 45,
            "pm003Count": 303.5, "pm005Count": 249.67, "pm01Count": 39.5, "pm02Count": 2,
            "atmp": 24.1, "atmpCompensated": 23.35,
            "rhum": 60.7, "rhumCompensated": 83.76,
            "pm02Compensated": 2.61, "rco2": 417,
            "tvocIndex": 48, "tvocRaw": 32520.83,
            "noxIndex": 2, "noxRaw": 17731.08,
            "boot": 2378, "bootCount": 2378, "wifi": -69,
            "serialno": "d83bda1d7660", "firmware": "3.2.0", "model": "O-1PST"
        }"#
    }

    #[test]
    fn test_deserialize_full_reading() {
        let reading: SensorReading = serde_json::from_str(full_reading_json()).unwrap();

        assert_eq!(reading.pm02_standard, 35.7);
        assert_eq!(reading.pm10_standard, 45.0);
        assert_eq!(reading.extra["serialno"], "d83bda1d7660");
        assert_eq!(reading.extra["wifi"], -69);
        assert!(!reading.extra.contains_key("pm02Standard"));
    }

    #[test]
    fn test_missing_standard_field_is_rejected() {
        let result: Result<SensorReading, _> =
            serde_json::from_str(r#"{"pm02Standard": 10.0, "pm02": 4}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("pm10Standard"), "unexpected error: {}", err);
    }

    #[test]
    fn test_enriched_reading_keeps_original_fields() {
        let reading: SensorReading = serde_json::from_str(full_reading_json()).unwrap();
        let enriched = AqiReading::new(reading, 101);

        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["aqi"], 101);
        assert_eq!(json["pm02Standard"], 35.7);
        assert_eq!(json["model"], "O-1PST");
        assert_eq!(json["tvocRaw"], 32520.83);
    }

    #[test]
    fn test_existing_aqi_field_is_replaced() {
        let reading: SensorReading =
            serde_json::from_str(r#"{"pm02Standard": 1.0, "pm10Standard": 1.0, "aqi": 999}"#)
                .unwrap();
        let enriched = AqiReading::new(reading, 4);

        let text = serde_json::to_string(&enriched).unwrap();
        assert_eq!(text.matches("\"aqi\"").count(), 1);
        let json: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["aqi"], 4);
    }
}

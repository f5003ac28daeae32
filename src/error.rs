//! Error types for the AQI calculator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while validating input,
//! loading configuration and moving readings over MQTT.
//!
//! Concentrations above the highest breakpoint are *not* an error: they
//! saturate to an AQI of 500.

use thiserror::Error;

use crate::models::Pollutant;

/// The main error type for the AQI calculator.
///
/// # Example
///
/// ```
/// use aqi_calculator::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/aqi.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/aqi.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A concentration was negative, NaN or infinite.
    #[error("Invalid {pollutant} concentration {value}: {message}")]
    InvalidConcentration {
        /// The pollutant the value was supplied for.
        pollutant: Pollutant,
        /// The rejected raw value.
        value: f64,
        /// Why the value was rejected.
        message: String,
    },

    /// A breakpoint table failed validation.
    #[error("Invalid {pollutant} breakpoint table: {message}")]
    InvalidBreakpoints {
        /// The pollutant owning the table.
        pollutant: Pollutant,
        /// A description of the defect.
        message: String,
    },

    /// An incoming sensor reading could not be parsed.
    #[error("Malformed sensor reading: {message}")]
    MalformedReading {
        /// A description of the parse failure.
        message: String,
    },

    /// An enriched reading could not be serialized.
    #[error("Failed to serialize enriched reading: {message}")]
    SerializationError {
        /// A description of the serialization failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of range or empty.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The MQTT client failed to queue a request.
    #[error("MQTT transport error: {message}")]
    TransportError {
        /// A description of the transport failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<rumqttc::ClientError> for EngineError {
    fn from(err: rumqttc::ClientError) -> Self {
        EngineError::TransportError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/aqi.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/aqi.yaml"
        );
    }

    #[test]
    fn test_invalid_concentration_displays_pollutant_and_value() {
        let error = EngineError::InvalidConcentration {
            pollutant: Pollutant::Pm25,
            value: -1.5,
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid PM2.5 concentration -1.5: must not be negative"
        );
    }

    #[test]
    fn test_invalid_breakpoints_displays_pollutant() {
        let error = EngineError::InvalidBreakpoints {
            pollutant: Pollutant::Pm10,
            message: "table is empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid PM10 breakpoint table: table is empty"
        );
    }

    #[test]
    fn test_malformed_reading_displays_message() {
        let error = EngineError::MalformedReading {
            message: "missing field `pm02Standard`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed sensor reading: missing field `pm02Standard`"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/etc/aqi.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/etc/aqi.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "qos".to_string(),
            message: "must be 0, 1 or 2".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration field 'qos': must be 0, 1 or 2"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_malformed() -> EngineResult<()> {
            Err(EngineError::MalformedReading {
                message: "empty payload".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_malformed()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

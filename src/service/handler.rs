//! Message handling for the AQI daemon.
//!
//! This module turns one raw MQTT payload into one enriched payload. It
//! has no knowledge of the broker connection, which keeps it testable
//! without a running broker.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::calculate_aqi;
use crate::error::{EngineError, EngineResult};
use crate::models::{AqiBreakdown, AqiReading, SensorReading};

/// A reading that has been enriched and is ready to publish.
#[derive(Debug, Clone)]
pub struct ProcessedReading {
    /// Identifier used to correlate log lines for this message.
    pub correlation_id: Uuid,
    /// When the message was received.
    pub received_at: DateTime<Utc>,
    /// The topic the reading arrived on.
    pub source_topic: String,
    /// How the AQI was derived.
    pub breakdown: AqiBreakdown,
    /// The serialized enriched reading.
    pub payload: Vec<u8>,
}

/// Parses a raw payload into a [`SensorReading`].
///
/// # Errors
///
/// Returns `MalformedReading` if the payload is not a JSON object or if
/// `pm02Standard` or `pm10Standard` is missing or not a number.
pub fn parse_reading(payload: &[u8]) -> EngineResult<SensorReading> {
    serde_json::from_slice(payload).map_err(|e| EngineError::MalformedReading {
        message: e.to_string(),
    })
}

/// Computes the AQI of a reading and attaches it.
pub fn enrich_reading(reading: SensorReading) -> EngineResult<(AqiReading, AqiBreakdown)> {
    let breakdown = calculate_aqi(reading.pm02_standard, reading.pm10_standard)?;
    Ok((AqiReading::new(reading, breakdown.aqi), breakdown))
}

/// Runs the full parse, calculate, enrich and serialize pipeline.
///
/// # Examples
///
/// ```
/// use aqi_calculator::service::process_payload;
/// use uuid::Uuid;
///
/// let payload = br#"{"pm02Standard": 8.0, "pm10Standard": 20.0, "serialno": "abc"}"#;
/// let processed = process_payload(Uuid::new_v4(), "airgradient/readings/abc", payload).unwrap();
///
/// let json: serde_json::Value = serde_json::from_slice(&processed.payload).unwrap();
/// assert_eq!(json["aqi"], 33);
/// assert_eq!(json["serialno"], "abc");
/// ```
pub fn process_payload(
    correlation_id: Uuid,
    topic: &str,
    payload: &[u8],
) -> EngineResult<ProcessedReading> {
    let received_at = Utc::now();
    let reading = parse_reading(payload)?;
    let (enriched, breakdown) = enrich_reading(reading)?;

    let payload = serde_json::to_vec(&enriched).map_err(|e| EngineError::SerializationError {
        message: e.to_string(),
    })?;

    Ok(ProcessedReading {
        correlation_id,
        received_at,
        source_topic: topic.to_string(),
        breakdown,
        payload,
    })
}

/// Processes one incoming message, logging the outcome.
///
/// Returns `None` when the message had to be dropped; the reason is
/// logged with the message's correlation id.
pub fn handle_message(topic: &str, payload: &[u8]) -> Option<ProcessedReading> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        topic = %topic,
        bytes = payload.len(),
        "Processing message"
    );

    let start_time = Instant::now();
    match process_payload(correlation_id, topic, payload) {
        Ok(processed) => {
            let breakdown = &processed.breakdown;
            info!(
                correlation_id = %correlation_id,
                received_at = %processed.received_at,
                aqi = breakdown.aqi,
                category = %breakdown.category,
                dominant_pollutant = %breakdown.dominant_pollutant,
                pm25_aqi = breakdown.pm25.aqi,
                pm10_aqi = breakdown.pm10.aqi,
                duration_us = start_time.elapsed().as_micros() as u64,
                "AQI calculated"
            );
            for step in &breakdown.audit_steps {
                debug!(
                    correlation_id = %correlation_id,
                    rule_id = %step.rule_id,
                    reasoning = %step.reasoning,
                    "Calculation step"
                );
            }
            Some(processed)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                topic = %topic,
                error = %err,
                "Dropping message"
            );
            None
        }
    }
}

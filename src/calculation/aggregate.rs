//! Multi-pollutant aggregation.
//!
//! The reported AQI is the worst of the pollutant sub-indices, never an
//! average and never a single preferred pollutant.

use crate::error::EngineResult;
use crate::models::{AqiBreakdown, AqiCategory, AuditStep, Concentration, Pollutant};

use super::breakpoints::breakpoints_for;
use super::sub_index::calculate_sub_index;

/// Calculates the AQI for a PM2.5 / PM10 pair with a full breakdown.
///
/// Both concentrations are validated first; negative, NaN or infinite
/// values fail with [`EngineError::InvalidConcentration`]. Values above
/// the highest breakpoint are not an error and saturate at 500.
///
/// [`EngineError::InvalidConcentration`]: crate::error::EngineError::InvalidConcentration
///
/// # Examples
///
/// ```
/// use aqi_calculator::calculation::calculate_aqi;
/// use aqi_calculator::models::Pollutant;
///
/// let breakdown = calculate_aqi(10.0, 200.0).unwrap();
/// assert_eq!(breakdown.pm25.aqi, 42);
/// assert_eq!(breakdown.pm10.aqi, 123);
/// assert_eq!(breakdown.aqi, 123);
/// assert_eq!(breakdown.dominant_pollutant, Pollutant::Pm10);
/// ```
pub fn calculate_aqi(pm25: f64, pm10: f64) -> EngineResult<AqiBreakdown> {
    let pm25 = Concentration::new(Pollutant::Pm25, pm25)?;
    let pm10 = Concentration::new(Pollutant::Pm10, pm10)?;

    let pm25 = calculate_sub_index(pm25, breakpoints_for(Pollutant::Pm25), 1);
    let pm10 = calculate_sub_index(pm10, breakpoints_for(Pollutant::Pm10), 2);

    let (aqi, dominant_pollutant) = if pm25.aqi >= pm10.aqi {
        (pm25.aqi, Pollutant::Pm25)
    } else {
        (pm10.aqi, Pollutant::Pm10)
    };
    let category = AqiCategory::from_aqi(aqi);

    let aggregate_step = AuditStep {
        step_number: 3,
        rule_id: "max_sub_index".to_string(),
        rule_name: "Worst Pollutant".to_string(),
        input: serde_json::json!({
            "pm25": pm25.aqi,
            "pm10": pm10.aqi
        }),
        output: serde_json::json!({
            "aqi": aqi,
            "dominant_pollutant": dominant_pollutant,
            "category": category
        }),
        reasoning: format!(
            "max(PM2.5 {}, PM10 {}) = {} ({}, {})",
            pm25.aqi, pm10.aqi, aqi, dominant_pollutant, category
        ),
    };

    let audit_steps = vec![
        pm25.audit_step.clone(),
        pm10.audit_step.clone(),
        aggregate_step,
    ];

    Ok(AqiBreakdown {
        aqi,
        category,
        dominant_pollutant,
        pm25,
        pm10,
        audit_steps,
    })
}

/// Computes the overall AQI for a PM2.5 / PM10 pair.
///
/// Returns `max(sub_index(PM2.5), sub_index(PM10))`, an integer in
/// `[0, 500]`.
///
/// # Examples
///
/// ```
/// use aqi_calculator::calculation::compute_aqi;
///
/// assert_eq!(compute_aqi(8.0, 20.0).unwrap(), 33);
/// assert_eq!(compute_aqi(35.7, 45.0).unwrap(), 101);
/// assert_eq!(compute_aqi(900.0, 0.0).unwrap(), 500);
/// assert!(compute_aqi(-1.0, 0.0).is_err());
/// ```
pub fn compute_aqi(pm25: f64, pm10: f64) -> EngineResult<u16> {
    calculate_aqi(pm25, pm10).map(|breakdown| breakdown.aqi)
}

//! Calculation result models for the AQI calculator.
//!
//! This module contains the [`AqiBreakdown`] type and its associated
//! structures that capture everything the core derived for a reading:
//! per-pollutant sub-indices, the dominant pollutant and an audit trail
//! of each arithmetic step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AqiCategory, Breakpoint, Pollutant};

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The sub-index derived for one pollutant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubIndexResult {
    /// The pollutant this sub-index belongs to.
    pub pollutant: Pollutant,
    /// The concentration as received.
    pub raw_concentration: f64,
    /// The concentration after truncation to one decimal place.
    pub truncated_concentration: Decimal,
    /// The tier used for interpolation, or `None` when saturated.
    pub tier: Option<Breakpoint>,
    /// The integer sub-index in `[0, 500]`.
    pub aqi: u16,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

impl SubIndexResult {
    /// Returns true if the concentration exceeded every tier.
    pub fn is_saturated(&self) -> bool {
        self.tier.is_none()
    }
}

/// The complete result of an AQI calculation.
///
/// # Example
///
/// ```
/// use aqi_calculator::calculation::calculate_aqi;
/// use aqi_calculator::models::{AqiCategory, Pollutant};
///
/// let breakdown = calculate_aqi(8.0, 20.0).unwrap();
/// assert_eq!(breakdown.aqi, 33);
/// assert_eq!(breakdown.category, AqiCategory::Good);
/// assert_eq!(breakdown.dominant_pollutant, Pollutant::Pm25);
/// assert_eq!(breakdown.audit_steps.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiBreakdown {
    /// The overall AQI: the worse of the two sub-indices.
    pub aqi: u16,
    /// The health category of `aqi`.
    pub category: AqiCategory,
    /// The pollutant whose sub-index became the overall AQI (PM2.5 on ties).
    pub dominant_pollutant: Pollutant,
    /// The PM2.5 sub-index.
    pub pm25: SubIndexResult,
    /// The PM10 sub-index.
    pub pm10: SubIndexResult,
    /// Every step taken, in order.
    pub audit_steps: Vec<AuditStep>,
}

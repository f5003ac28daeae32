//! Breakpoint lookup and linear interpolation for a single pollutant.
//!
//! ## Formula
//!
//! ```text
//! I = round( (IHi - ILo) / (BPHi - BPLo) * (Cp - BPLo) + ILo )
//! ```
//!
//! ## Tier selection
//!
//! Tiers are matched as contiguous half-open intervals
//! `[conc_low, next.conc_low)`; the last tier is closed at its `conc_high`.
//! A truncated concentration that falls in the gap between one tier's
//! `conc_high` and the next tier's `conc_low` (PM10 54.5, for instance)
//! is interpolated with `Cp` clamped to `conc_high` and therefore takes
//! the lower tier's `aqi_high`. Anything above the last tier saturates at
//! [`AQI_CEILING`].
//!
//! ## Rounding
//!
//! Interpolation is exact decimal arithmetic, multiplying before dividing,
//! so `Cp == BPHi` yields `IHi` with no drift. The result is rounded half
//! away from zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::breakpoints::AQI_CEILING;
use super::truncation::{concentration_to_decimal, truncate_concentration};
use crate::models::{AuditStep, Breakpoint, Concentration, SubIndexResult};

/// Where a truncated concentration landed in a breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TierMatch {
    /// Inside a tier; the second field is the concentration used for
    /// interpolation (clamped into the tier).
    Within(Breakpoint, Decimal),
    /// Above every tier.
    Saturated,
}

fn select_tier(concentration: Decimal, breakpoints: &[Breakpoint]) -> TierMatch {
    let Some(first) = breakpoints.first() else {
        return TierMatch::Saturated;
    };

    // Undefined for well-formed tables, which start at zero.
    if concentration < first.conc_low {
        return TierMatch::Within(*first, first.conc_low);
    }

    for (index, tier) in breakpoints.iter().enumerate() {
        let matched = match breakpoints.get(index + 1) {
            Some(next) => concentration >= tier.conc_low && concentration < next.conc_low,
            None => tier.contains(concentration),
        };

        if matched {
            return TierMatch::Within(*tier, concentration.min(tier.conc_high));
        }
    }

    TierMatch::Saturated
}

fn interpolate(tier: &Breakpoint, concentration: Decimal) -> u16 {
    let conc_span = tier.conc_high - tier.conc_low;
    if conc_span.is_zero() {
        return tier.aqi_high;
    }

    let aqi_span = Decimal::from(tier.aqi_high - tier.aqi_low);
    let value = aqi_span * (concentration - tier.conc_low) / conc_span + Decimal::from(tier.aqi_low);

    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u16()
        .map_or(AQI_CEILING, |aqi| aqi.min(AQI_CEILING))
}

/// Calculates the AQI sub-index of one pollutant.
///
/// The concentration is truncated to one decimal place, matched against
/// `breakpoints` and linearly interpolated. Concentrations above the
/// highest tier saturate at 500 rather than failing.
///
/// # Arguments
///
/// * `concentration` - The validated raw concentration
/// * `breakpoints` - The pollutant's ordered breakpoint tiers
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use aqi_calculator::calculation::{calculate_sub_index, PM25_BREAKPOINTS};
/// use aqi_calculator::models::{Concentration, Pollutant};
///
/// let pm25 = Concentration::new(Pollutant::Pm25, 35.4).unwrap();
/// let result = calculate_sub_index(pm25, &PM25_BREAKPOINTS, 1);
/// assert_eq!(result.aqi, 100);
///
/// let extreme = Concentration::new(Pollutant::Pm25, 812.0).unwrap();
/// let result = calculate_sub_index(extreme, &PM25_BREAKPOINTS, 1);
/// assert_eq!(result.aqi, 500);
/// assert!(result.is_saturated());
/// ```
pub fn calculate_sub_index(
    concentration: Concentration,
    breakpoints: &[Breakpoint],
    step_number: u32,
) -> SubIndexResult {
    let pollutant = concentration.pollutant();
    let raw = concentration.value();

    let truncated = concentration_to_decimal(raw).map(truncate_concentration);
    let tier_match = truncated.map_or(TierMatch::Saturated, |cp| select_tier(cp, breakpoints));
    let highest = breakpoints.last().map(|tier| tier.conc_high);

    let rule_id = format!("{}_sub_index", pollutant.id());
    let rule_name = format!("{} Sub-Index", pollutant);
    let input = serde_json::json!({
        "raw_concentration": raw,
        "truncated_concentration": truncated.map(|cp| cp.to_string()),
    });

    match tier_match {
        TierMatch::Within(tier, cp) => {
            let aqi = interpolate(&tier, cp);
            // Within implies a successful conversion.
            let truncated = truncated.unwrap_or(cp);

            let reasoning = if cp == truncated {
                format!(
                    "{} truncated to {}: ({} - {}) / ({} - {}) x ({} - {}) + {} = {}",
                    raw,
                    truncated,
                    tier.aqi_high,
                    tier.aqi_low,
                    tier.conc_high,
                    tier.conc_low,
                    cp,
                    tier.conc_low,
                    tier.aqi_low,
                    aqi
                )
            } else {
                format!(
                    "{} truncated to {} lies between tiers; clamped to {} giving {}",
                    raw, truncated, cp, aqi
                )
            };

            let audit_step = AuditStep {
                step_number,
                rule_id,
                rule_name,
                input,
                output: serde_json::json!({
                    "aqi": aqi,
                    "saturated": false,
                    "tier": {
                        "conc_low": tier.conc_low.to_string(),
                        "conc_high": tier.conc_high.to_string(),
                        "aqi_low": tier.aqi_low,
                        "aqi_high": tier.aqi_high
                    }
                }),
                reasoning,
            };

            SubIndexResult {
                pollutant,
                raw_concentration: raw,
                truncated_concentration: truncated,
                tier: Some(tier),
                aqi,
                audit_step,
            }
        }
        TierMatch::Saturated => {
            let reasoning = match highest {
                Some(highest) => format!(
                    "{} exceeds the highest {} breakpoint {}; capped at {}",
                    raw, pollutant, highest, AQI_CEILING
                ),
                None => format!(
                    "No {} breakpoints defined; capped at {}",
                    pollutant, AQI_CEILING
                ),
            };

            let audit_step = AuditStep {
                step_number,
                rule_id,
                rule_name,
                input,
                output: serde_json::json!({
                    "aqi": AQI_CEILING,
                    "saturated": true
                }),
                reasoning,
            };

            SubIndexResult {
                pollutant,
                raw_concentration: raw,
                truncated_concentration: truncated.unwrap_or(Decimal::MAX),
                tier: None,
                aqi: AQI_CEILING,
                audit_step,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{PM10_BREAKPOINTS, PM25_BREAKPOINTS};
    use crate::models::Pollutant;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pm25(value: f64) -> SubIndexResult {
        let c = Concentration::new(Pollutant::Pm25, value).unwrap();
        calculate_sub_index(c, &PM25_BREAKPOINTS, 1)
    }

    fn pm10(value: f64) -> SubIndexResult {
        let c = Concentration::new(Pollutant::Pm10, value).unwrap();
        calculate_sub_index(c, &PM10_BREAKPOINTS, 1)
    }

    #[test]
    fn test_pm25_exact_breakpoints() {
        let cases = [
            (0.0, 0),
            (12.0, 50),
            (12.1, 51),
            (35.4, 100),
            (35.5, 101),
            (55.4, 150),
            (55.5, 151),
            (150.4, 200),
            (150.5, 201),
            (250.4, 300),
            (250.5, 301),
            (350.4, 400),
            (350.5, 401),
            (500.4, 500),
        ];

        for (value, expected) in cases {
            assert_eq!(pm25(value).aqi, expected, "PM2.5 = {}", value);
        }
    }

    #[test]
    fn test_every_tier_upper_bound_maps_to_aqi_high() {
        for tier in PM25_BREAKPOINTS.iter().chain(PM10_BREAKPOINTS.iter()) {
            assert_eq!(interpolate(tier, tier.conc_high), tier.aqi_high);
            assert_eq!(interpolate(tier, tier.conc_low), tier.aqi_low);
        }
    }

    #[test]
    fn test_pm25_interpolated_values() {
        assert_eq!(pm25(8.0).aqi, 33);
        assert_eq!(pm25(10.0).aqi, 42);
        assert_eq!(pm25(35.7).aqi, 101);
        assert_eq!(pm25(400.0).aqi, 434);
    }

    #[test]
    fn test_pm25_truncation_before_lookup() {
        let truncated = pm25(35.49);
        assert_eq!(truncated.truncated_concentration, dec("35.4"));
        assert_eq!(truncated.aqi, pm25(35.40).aqi);
        assert_eq!(truncated.aqi, 100);

        // 12.09 must stay in the Good tier
        assert_eq!(pm25(12.09).aqi, 50);
    }

    #[test]
    fn test_pm25_saturates_above_highest_breakpoint() {
        for value in [500.5, 600.0, 10_000.0, 1.0e300] {
            let result = pm25(value);
            assert_eq!(result.aqi, 500, "PM2.5 = {}", value);
            assert!(result.is_saturated());
            assert_eq!(result.audit_step.output["saturated"], true);
        }
    }

    #[test]
    fn test_pm25_highest_defined_value_is_not_saturated() {
        let result = pm25(500.49);
        assert_eq!(result.aqi, 500);
        assert!(!result.is_saturated());
    }

    #[test]
    fn test_pm10_interpolated_values() {
        assert_eq!(pm10(20.0).aqi, 19);
        assert_eq!(pm10(45.0).aqi, 42);
        assert_eq!(pm10(100.0).aqi, 73);
        assert_eq!(pm10(200.0).aqi, 123);
        assert_eq!(pm10(500.0).aqi, 395);
    }

    #[test]
    fn test_pm10_gap_between_tiers_takes_lower_tier_high() {
        let cases = [
            (54.0, 50),
            (54.5, 50),
            (54.9, 50),
            (54.99, 50),
            (55.0, 51),
            (55.1, 51),
            (154.0, 100),
            (154.5, 100),
            (155.0, 101),
            (604.0, 500),
            (604.9, 500),
        ];

        for (value, expected) in cases {
            assert_eq!(pm10(value).aqi, expected, "PM10 = {}", value);
        }
    }

    #[test]
    fn test_pm10_gap_value_records_lower_tier() {
        let result = pm10(54.5);
        let tier = result.tier.unwrap();
        assert_eq!(tier.conc_high, dec("54"));
        assert!(result.audit_step.reasoning.contains("between tiers"));
    }

    #[test]
    fn test_pm10_saturates_above_last_tier() {
        assert_eq!(pm10(605.0).aqi, 500);
        assert!(pm10(605.0).is_saturated());
        // No tier follows the last one, so its upper bound is closed.
        assert!(pm10(604.9).is_saturated());
        assert!(!pm10(604.0).is_saturated());
    }

    #[test]
    fn test_single_tier_table_is_closed_at_its_upper_bound() {
        let table = [Breakpoint::new(dec("0"), dec("10"), 0, 50)];
        let at_bound = Concentration::new(Pollutant::Pm25, 10.0).unwrap();
        let above = Concentration::new(Pollutant::Pm25, 10.1).unwrap();

        let result = calculate_sub_index(at_bound, &table, 1);
        assert_eq!(result.aqi, 50);
        assert_eq!(result.tier, Some(table[0]));

        let result = calculate_sub_index(above, &table, 1);
        assert!(result.is_saturated());
        assert_eq!(result.aqi, AQI_CEILING);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 50 x 1 / 4 = 12.5 exactly
        let tier = Breakpoint::new(dec("0"), dec("4"), 0, 50);
        assert_eq!(interpolate(&tier, dec("1")), 13);
        // 50 x 3 / 4 = 37.5 exactly
        assert_eq!(interpolate(&tier, dec("3")), 38);
    }

    #[test]
    fn test_degenerate_tier_yields_aqi_high() {
        let tier = Breakpoint::new(dec("5"), dec("5"), 10, 20);
        assert_eq!(interpolate(&tier, dec("5")), 20);
    }

    #[test]
    fn test_empty_table_saturates() {
        let c = Concentration::new(Pollutant::Pm25, 1.0).unwrap();
        let result = calculate_sub_index(c, &[], 1);
        assert_eq!(result.aqi, 500);
        assert!(result.audit_step.reasoning.contains("No PM2.5 breakpoints"));
    }

    #[test]
    fn test_audit_step_records_inputs_and_tier() {
        let c = Concentration::new(Pollutant::Pm25, 35.49).unwrap();
        let result = calculate_sub_index(c, &PM25_BREAKPOINTS, 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "pm25_sub_index");
        assert_eq!(result.audit_step.rule_name, "PM2.5 Sub-Index");
        assert_eq!(result.audit_step.input["raw_concentration"], 35.49);
        assert_eq!(result.audit_step.input["truncated_concentration"], "35.4");
        assert_eq!(result.audit_step.output["aqi"], 100);
        assert_eq!(result.audit_step.output["tier"]["conc_low"], "12.1");
        assert_eq!(result.audit_step.output["tier"]["aqi_high"], 100);
        assert!(result.audit_step.reasoning.contains("(100 - 51) / (35.4 - 12.1)"));
    }
}

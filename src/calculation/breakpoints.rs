//! EPA breakpoint tables for particulate matter.
//!
//! Concentrations are µg/m³ on a 24-hour average basis. The tables are
//! reproduced verbatim from the EPA AQI Technical Assistance Document
//! (EPA-454/B-18-007, September 2018), including the gaps between the
//! upper bound of one tier and the lower bound of the next.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Breakpoint, Pollutant};

/// The AQI reported for concentrations beyond the highest tier.
pub const AQI_CEILING: u16 = 500;

const fn tenths(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 1)
}

const fn whole(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 0)
}

/// PM2.5 breakpoints, Good through Hazardous.
pub const PM25_BREAKPOINTS: [Breakpoint; 7] = [
    Breakpoint::new(tenths(0), tenths(120), 0, 50),
    Breakpoint::new(tenths(121), tenths(354), 51, 100),
    Breakpoint::new(tenths(355), tenths(554), 101, 150),
    Breakpoint::new(tenths(555), tenths(1504), 151, 200),
    Breakpoint::new(tenths(1505), tenths(2504), 201, 300),
    Breakpoint::new(tenths(2505), tenths(3504), 301, 400),
    Breakpoint::new(tenths(3505), tenths(5004), 401, 500),
];

/// PM10 breakpoints, Good through Hazardous.
pub const PM10_BREAKPOINTS: [Breakpoint; 7] = [
    Breakpoint::new(whole(0), whole(54), 0, 50),
    Breakpoint::new(whole(55), whole(154), 51, 100),
    Breakpoint::new(whole(155), whole(254), 101, 150),
    Breakpoint::new(whole(255), whole(354), 151, 200),
    Breakpoint::new(whole(355), whole(424), 201, 300),
    Breakpoint::new(whole(425), whole(504), 301, 400),
    Breakpoint::new(whole(505), whole(604), 401, 500),
];

/// Returns the breakpoint table for a pollutant.
///
/// # Example
///
/// ```
/// use aqi_calculator::calculation::breakpoints_for;
/// use aqi_calculator::models::Pollutant;
///
/// let tiers = breakpoints_for(Pollutant::Pm25);
/// assert_eq!(tiers.len(), 7);
/// assert_eq!(tiers[1].aqi_low, 51);
/// ```
pub fn breakpoints_for(pollutant: Pollutant) -> &'static [Breakpoint] {
    match pollutant {
        Pollutant::Pm25 => &PM25_BREAKPOINTS,
        Pollutant::Pm10 => &PM10_BREAKPOINTS,
    }
}

/// Checks that a breakpoint table can serve every non-negative concentration.
///
/// A valid table is non-empty, starts at a concentration of zero, has
/// well-ordered bounds within every tier, ascends strictly without
/// overlap, and assigns contiguous AQI ranges (`aqi_low` of a tier is
/// one above the previous tier's `aqi_high`) that stay within the ceiling.
pub fn validate_breakpoints(pollutant: Pollutant, breakpoints: &[Breakpoint]) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidBreakpoints { pollutant, message };

    let first = breakpoints
        .first()
        .ok_or_else(|| invalid("table is empty".to_string()))?;

    if !first.conc_low.is_zero() {
        return Err(invalid(format!(
            "first tier starts at {} instead of 0",
            first.conc_low
        )));
    }

    for (index, tier) in breakpoints.iter().enumerate() {
        if tier.conc_low > tier.conc_high {
            return Err(invalid(format!(
                "tier {} has conc_low {} above conc_high {}",
                index + 1,
                tier.conc_low,
                tier.conc_high
            )));
        }
        if tier.aqi_low > tier.aqi_high {
            return Err(invalid(format!(
                "tier {} has aqi_low {} above aqi_high {}",
                index + 1,
                tier.aqi_low,
                tier.aqi_high
            )));
        }
        if tier.aqi_high > AQI_CEILING {
            return Err(invalid(format!(
                "tier {} has aqi_high {} above {}",
                index + 1,
                tier.aqi_high,
                AQI_CEILING
            )));
        }
    }

    for (index, pair) in breakpoints.windows(2).enumerate() {
        let (previous, next) = (&pair[0], &pair[1]);
        if next.conc_low <= previous.conc_high {
            return Err(invalid(format!(
                "tier {} starts at {} which overlaps the previous tier ending at {}",
                index + 2,
                next.conc_low,
                previous.conc_high
            )));
        }
        if next.aqi_low != previous.aqi_high + 1 {
            return Err(invalid(format!(
                "tier {} starts at AQI {} but the previous tier ends at AQI {}",
                index + 2,
                next.aqi_low,
                previous.aqi_high
            )));
        }
    }

    Ok(())
}

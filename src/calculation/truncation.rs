//! Concentration truncation.
//!
//! EPA guidance requires concentrations to be truncated, never rounded,
//! before the breakpoint lookup: PM2.5 and PM10 both keep one decimal
//! place. Rounding would overstate borderline readings.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Raw values at or above this are treated as beyond every breakpoint
/// without being converted to a `Decimal`.
pub const MAX_EXACT_CONCENTRATION: f64 = 1.0e15;

/// Converts a non-negative `f64` to the `Decimal` with the same shortest
/// decimal representation.
///
/// Going through the shortest representation means `2.3` becomes exactly
/// `2.3` rather than `2.29999999999999982236431605997495353221893310546875`,
/// so truncation never loses a tenth to binary rounding. Returns `None` for
/// values at or above [`MAX_EXACT_CONCENTRATION`].
///
/// # Example
///
/// ```
/// use aqi_calculator::calculation::concentration_to_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(concentration_to_decimal(2.3), Some(Decimal::new(23, 1)));
/// assert_eq!(concentration_to_decimal(1.0e300), None);
/// ```
pub fn concentration_to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() || value >= MAX_EXACT_CONCENTRATION {
        return None;
    }

    // Sub-normal and very small values can carry more fractional digits
    // than a Decimal holds; twelve places is far below one tenth.
    Decimal::from_str(&value.to_string())
        .or_else(|_| Decimal::from_str(&format!("{:.12}", value)))
        .ok()
}

/// Truncates a concentration toward zero to one decimal place.
///
/// Equivalent to `floor(c * 10) / 10` for `c >= 0`. Truncating an already
/// truncated value returns it unchanged.
///
/// # Examples
///
/// ```
/// use aqi_calculator::calculation::truncate_concentration;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let truncated = truncate_concentration(Decimal::from_str("35.49").unwrap());
/// assert_eq!(truncated, Decimal::from_str("35.4").unwrap());
/// ```
pub fn truncate_concentration(concentration: Decimal) -> Decimal {
    concentration.round_dp_with_strategy(1, RoundingStrategy::ToZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        assert_eq!(truncate_concentration(dec("35.49")), dec("35.4"));
        assert_eq!(truncate_concentration(dec("12.09")), dec("12.0"));
        assert_eq!(truncate_concentration(dec("54.99")), dec("54.9"));
    }

    #[test]
    fn test_values_with_one_decimal_are_unchanged() {
        assert_eq!(truncate_concentration(dec("35.4")), dec("35.4"));
        assert_eq!(truncate_concentration(dec("0.0")), dec("0.0"));
        assert_eq!(truncate_concentration(dec("45")), dec("45"));
    }

    #[test]
    fn test_truncation_is_idempotent() {
        for s in ["0.05", "8.0", "35.49", "150.45", "604.99"] {
            let once = truncate_concentration(dec(s));
            assert_eq!(truncate_concentration(once), once, "value {}", s);
        }
    }

    #[test]
    fn test_binary_artefacts_do_not_lose_a_tenth() {
        // 2.3 * 10.0 == 22.999999999999996 in f64
        let value = concentration_to_decimal(2.3).unwrap();
        assert_eq!(truncate_concentration(value), dec("2.3"));

        let value = concentration_to_decimal(4.35).unwrap();
        assert_eq!(truncate_concentration(value), dec("4.3"));
    }

    #[test]
    fn test_tiny_values_convert() {
        let value = concentration_to_decimal(5.0e-324).unwrap();
        assert_eq!(truncate_concentration(value), Decimal::ZERO);
    }

    #[test]
    fn test_huge_values_are_not_converted() {
        assert_eq!(concentration_to_decimal(MAX_EXACT_CONCENTRATION), None);
        assert_eq!(concentration_to_decimal(f64::MAX), None);
        assert_eq!(concentration_to_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_whole_numbers_convert_exactly() {
        assert_eq!(concentration_to_decimal(45.0), Some(dec("45")));
        assert_eq!(concentration_to_decimal(1.0e12), Some(dec("1000000000000")));
    }
}

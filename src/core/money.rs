//! Rounding and display conventions shared by every calculator.
//!
//! Whole-unit amounts use round-half-to-even so that exact halves such as
//! `1082.5` land on the even neighbour (`1082`). Tax amounts stay unrounded
//! and are only formatted with two decimals.

use super::error::{FinanceError, FinanceResult};

pub const CURRENCY_SYMBOL: &str = "₹";

// 2^63; `i64::MAX` itself is not representable as an f64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Rounds `amount` to whole units. Fails instead of saturating when the
/// result does not fit in an `i64`.
pub fn round_currency(field: &'static str, amount: f64) -> FinanceResult<i64> {
    let rounded = amount.round_ties_even();
    if !rounded.is_finite() || rounded >= I64_BOUND || rounded < -I64_BOUND {
        return Err(FinanceError::domain(
            field,
            amount,
            "exceeds the representable currency range",
        ));
    }
    Ok(rounded as i64)
}

pub fn format_whole(amount: i64) -> String {
    format!("{CURRENCY_SYMBOL}{amount}")
}

pub fn format_decimal(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL}{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(amount: f64) -> i64 {
        round_currency("amount", amount).expect("amount in range")
    }

    #[test]
    fn exact_halves_round_to_even() {
        assert_eq!(round(1082.5), 1082);
        assert_eq!(round(1083.5), 1084);
        assert_eq!(round(0.5), 0);
    }

    #[test]
    fn non_halves_round_to_nearest() {
        assert_eq!(round(19_908.033_899), 19_908);
        assert_eq!(round(129_502.9), 129_503);
        assert_eq!(round(127_728.912_499), 127_729);
    }

    #[test]
    fn amounts_outside_i64_are_rejected() {
        assert!(matches!(
            round_currency("maturity amount", 1e19),
            Err(FinanceError::Domain { field: "maturity amount", .. })
        ));
        assert!(round_currency("amount", 9_223_372_036_854_775_808.0).is_err());
        assert!(round_currency("amount", -1e19).is_err());
        assert!(round_currency("amount", f64::INFINITY).is_err());
        assert!(round_currency("amount", f64::NAN).is_err());
        assert_eq!(round(9.0e18), 9_000_000_000_000_000_000);
    }

    #[test]
    fn display_convention() {
        assert_eq!(format_whole(199_080), "₹199080");
        assert_eq!(format_decimal(62_400.0), "₹62400.00");
        assert_eq!(format_decimal(97_500.004), "₹97500.00");
    }
}
